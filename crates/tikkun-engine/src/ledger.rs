//! The correction ledger: append-only fix chains, one per
//! (location, original word), with exactly one head per chain.

use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use tikkun_core::models::aggregation::AggregationKey;
use tikkun_core::models::correction::{ChainKey, CorrectionRecord, FixType, Provenance};
use tikkun_rules::classify;
use tikkun_storage::{ChainTransaction, CorrectionStore};

use crate::audit::CorrectionEvent;
use crate::error::EngineError;

/// Input to [`CorrectionLedger::record_correction`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordCorrectionInput {
    pub collection_id: String,
    pub location_id: String,
    /// The chain's original surface form.
    pub original_word: String,
    /// The word as it stands right now. Defaults to `original_word`.
    #[serde(default)]
    pub current_word: Option<String>,
    pub corrected_word: String,
    #[serde(default)]
    pub sentence_context: String,
    /// Classified from the word pair when absent.
    #[serde(default)]
    pub fix_type: Option<FixType>,
    #[serde(default)]
    pub provenance: Provenance,
}

pub struct CorrectionLedger<S> {
    store: Arc<S>,
}

impl<S> Clone for CorrectionLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CorrectionStore> CorrectionLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn record_correction(
        &self,
        input: RecordCorrectionInput,
    ) -> Result<CorrectionRecord, EngineError> {
        self.record_correction_at(input, Timestamp::now()).await
    }

    /// [`record_correction`](Self::record_correction) with an explicit
    /// creation time, for imports and replays.
    pub async fn record_correction_at(
        &self,
        input: RecordCorrectionInput,
        created_at: Timestamp,
    ) -> Result<CorrectionRecord, EngineError> {
        validate(&input)?;

        let fix_type = input
            .fix_type
            .unwrap_or_else(|| classify(&input.original_word, &input.corrected_word).fix_type);
        let key = ChainKey::new(&input.location_id, &input.original_word);

        let mut tx = self.store.begin_chain(&key).await?;
        let fix_sequence = tx
            .records()
            .iter()
            .map(|r| r.fix_sequence)
            .max()
            .map_or(1, |max| max + 1);
        if fix_sequence > 1 {
            tx.clear_latest();
        }

        let record = CorrectionRecord {
            id: Uuid::new_v4(),
            aggregation_key: AggregationKey::new(&input.original_word, &input.corrected_word)
                .into(),
            current_word: input
                .current_word
                .unwrap_or_else(|| input.original_word.clone()),
            collection_id: input.collection_id,
            location_id: input.location_id,
            original_word: input.original_word,
            corrected_word: input.corrected_word,
            sentence_context: input.sentence_context,
            fix_type,
            fix_sequence,
            is_latest_fix: true,
            created_at,
            provenance: input.provenance,
        };
        tx.insert(record.clone());
        tx.commit().await?;

        CorrectionEvent::new(
            "correction.recorded",
            &record.collection_id,
            &record.location_id,
            &record.original_word,
            &record.corrected_word,
        )
        .with_details(json!({
            "id": record.id,
            "fix_type": record.fix_type,
            "fix_sequence": record.fix_sequence,
        }))
        .emit();

        Ok(record)
    }

    /// Every fix of `original_word` at `location_id`, ascending by sequence.
    pub async fn get_fix_history_for_word(
        &self,
        location_id: &str,
        original_word: &str,
    ) -> Result<Vec<CorrectionRecord>, EngineError> {
        Ok(self
            .store
            .chain(&ChainKey::new(location_id, original_word))
            .await?)
    }

    pub async fn find_latest_fix_for_word(
        &self,
        location_id: &str,
        original_word: &str,
    ) -> Result<Option<CorrectionRecord>, EngineError> {
        let chain = self.get_fix_history_for_word(location_id, original_word).await?;
        Ok(chain.into_iter().find(|r| r.is_latest_fix))
    }

    /// Every record at a location across all of its chains, oldest first.
    pub async fn history_for_location(
        &self,
        location_id: &str,
    ) -> Result<Vec<CorrectionRecord>, EngineError> {
        Ok(self.store.location_records(location_id).await?)
    }

    /// Remove one record. When it was its chain's head, the highest
    /// remaining sequence becomes the head.
    pub async fn delete_correction(&self, id: Uuid) -> Result<CorrectionRecord, EngineError> {
        let found = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("correction {id}")))?;

        let mut tx = self.store.begin_chain(&found.chain_key()).await?;
        // Re-read under the chain lock; a concurrent delete may have won.
        let removed = tx
            .records()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("correction {id}")))?;
        let successor = tx
            .records()
            .iter()
            .filter(|r| r.id != id)
            .max_by_key(|r| r.fix_sequence)
            .map(|r| r.id);

        tx.remove(id);
        if removed.is_latest_fix
            && let Some(next) = successor
        {
            tx.mark_latest(next);
        }
        tx.commit().await?;
        debug!(%id, new_head = ?successor, "correction removed");

        CorrectionEvent::new(
            "correction.deleted",
            &removed.collection_id,
            &removed.location_id,
            &removed.original_word,
            &removed.corrected_word,
        )
        .with_details(json!({ "id": removed.id, "fix_sequence": removed.fix_sequence }))
        .emit();

        Ok(removed)
    }
}

fn validate(input: &RecordCorrectionInput) -> Result<(), EngineError> {
    let required = [
        ("collection_id", &input.collection_id),
        ("location_id", &input.location_id),
        ("original_word", &input.original_word),
        ("corrected_word", &input.corrected_word),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(EngineError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}
