//! Applies one accepted change to a set of locations, recording a ledger
//! entry for each location that changed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use tikkun_core::models::change::WordChange;
use tikkun_core::models::correction::{FixType, Provenance};
use tikkun_core::models::suggestion::{BulkOutcome, SkipReason};
use tikkun_match::{BoundaryMatcher, WordPattern, sentence_context};
use tikkun_rules::classify;
use tikkun_storage::{CorrectionStore, LocationStore};

use crate::audit::CorrectionEvent;
use crate::error::EngineError;
use crate::ledger::{CorrectionLedger, RecordCorrectionInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkFixRequest {
    pub collection_id: String,
    pub original_word: String,
    pub corrected_word: String,
    #[serde(default)]
    pub fix_type: Option<FixType>,
    pub location_ids: Vec<String>,
    #[serde(default)]
    pub provenance: Provenance,
}

pub struct BulkFixApplier<S> {
    store: Arc<S>,
    ledger: CorrectionLedger<S>,
    matcher: BoundaryMatcher,
}

impl<S> Clone for BulkFixApplier<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ledger: self.ledger.clone(),
            matcher: self.matcher,
        }
    }
}

impl<S: LocationStore + CorrectionStore> BulkFixApplier<S> {
    pub fn new(store: Arc<S>, matcher: BoundaryMatcher) -> Self {
        Self {
            ledger: CorrectionLedger::new(Arc::clone(&store)),
            store,
            matcher,
        }
    }

    /// Replace every standalone occurrence at each requested location.
    ///
    /// Locations are handled one at a time and independently: a skipped
    /// location does not stop the rest. Text is updated before the ledger
    /// entry is written, so an error part-way leaves earlier locations
    /// applied.
    pub async fn apply(&self, request: &BulkFixRequest) -> Result<Vec<BulkOutcome>, EngineError> {
        if WordChange::new(&request.original_word, &request.corrected_word).is_noop() {
            return Err(EngineError::Validation(
                "original_word and corrected_word must differ and be non-empty".to_string(),
            ));
        }
        let fix_type = request.fix_type.unwrap_or_else(|| {
            classify(&request.original_word, &request.corrected_word).fix_type
        });
        let pattern = self.matcher.compile(&request.original_word).ok_or_else(|| {
            EngineError::Validation(format!("cannot search for {:?}", request.original_word))
        })?;

        let mut outcomes = Vec::with_capacity(request.location_ids.len());
        for location_id in &request.location_ids {
            outcomes.push(self.apply_one(request, location_id, &pattern, fix_type).await?);
        }

        let applied = outcomes
            .iter()
            .filter(|o| matches!(o, BulkOutcome::Applied { .. }))
            .count();
        info!(
            collection_id = %request.collection_id,
            original = %request.original_word,
            corrected = %request.corrected_word,
            requested = request.location_ids.len(),
            applied,
            "bulk fix applied"
        );
        Ok(outcomes)
    }

    async fn apply_one(
        &self,
        request: &BulkFixRequest,
        location_id: &str,
        pattern: &WordPattern,
        fix_type: FixType,
    ) -> Result<BulkOutcome, EngineError> {
        let skipped = |reason| BulkOutcome::Skipped {
            location_id: location_id.to_string(),
            reason,
        };

        let Some(location) = self.store.get_location(location_id).await? else {
            return Ok(skipped(SkipReason::NotFound));
        };
        if location.collection_id != request.collection_id {
            return Ok(skipped(SkipReason::OtherCollection));
        }
        if location.completed {
            return Ok(skipped(SkipReason::Completed));
        }

        let found = pattern.find(&location.text);
        let Some(first) = found.first() else {
            return Ok(skipped(SkipReason::NoOccurrences));
        };
        let context = sentence_context(&location.text, first);

        let text = pattern.replace(&location.text, &request.corrected_word);
        self.store.update_text(location_id, text).await?;

        self.ledger
            .record_correction(RecordCorrectionInput {
                collection_id: request.collection_id.clone(),
                location_id: location_id.to_string(),
                original_word: request.original_word.clone(),
                current_word: None,
                corrected_word: request.corrected_word.clone(),
                sentence_context: context,
                fix_type: Some(fix_type),
                provenance: request.provenance.clone(),
            })
            .await?;

        CorrectionEvent::new(
            "bulk.applied",
            &request.collection_id,
            location_id,
            &request.original_word,
            &request.corrected_word,
        )
        .with_details(json!({ "replacements": found.len() }))
        .emit();

        Ok(BulkOutcome::Applied {
            location_id: location_id.to_string(),
            replacements: found.len(),
        })
    }
}
