//! Finds other locations in a collection that still contain a word the
//! user just corrected, with before/after previews.

use std::sync::Arc;

use tracing::{debug, warn};

use tikkun_core::models::change::{EditEvent, WordChange};
use tikkun_core::models::location::Location;
use tikkun_core::models::suggestion::{LocationMatch, Suggestion};
use tikkun_match::{BoundaryMatcher, build_preview};
use tikkun_rules::classify;
use tikkun_storage::LocationStore;

use crate::error::EngineError;

pub struct SimilarFixFinder<L> {
    locations: Arc<L>,
    matcher: BoundaryMatcher,
}

impl<L> Clone for SimilarFixFinder<L> {
    fn clone(&self) -> Self {
        Self {
            locations: Arc::clone(&self.locations),
            matcher: self.matcher,
        }
    }
}

impl<L: LocationStore> SimilarFixFinder<L> {
    pub fn new(locations: Arc<L>, matcher: BoundaryMatcher) -> Self {
        Self { locations, matcher }
    }

    /// One suggestion per meaningful change, in input order.
    ///
    /// Searches every incomplete location of the collection except
    /// `exclude_location_id`. No-op changes are dropped; a change that
    /// matches nowhere still yields a suggestion with no locations.
    pub async fn find_similar_fixes_in_book(
        &self,
        collection_id: &str,
        exclude_location_id: &str,
        changes: &[WordChange],
    ) -> Result<Vec<Suggestion>, EngineError> {
        let changes: Vec<&WordChange> = changes
            .iter()
            .filter(|change| {
                let noop = change.is_noop();
                if noop {
                    warn!(
                        original = %change.original_word,
                        corrected = %change.corrected_word,
                        "skipping no-op change"
                    );
                }
                !noop
            })
            .collect();
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let locations = self
            .locations
            .list_locations(collection_id, Some(exclude_location_id), false)
            .await?;
        debug!(
            collection_id,
            changes = changes.len(),
            locations = locations.len(),
            "searching for similar fixes"
        );

        Ok(changes
            .into_iter()
            .map(|change| self.suggest(change, &locations))
            .collect())
    }

    pub async fn suggest_for_edit(&self, event: &EditEvent) -> Result<Vec<Suggestion>, EngineError> {
        self.find_similar_fixes_in_book(&event.collection_id, &event.location_id, &event.changes)
            .await
    }

    fn suggest(&self, change: &WordChange, locations: &[Location]) -> Suggestion {
        let fix_type = change
            .fix_type
            .unwrap_or_else(|| classify(&change.original_word, &change.corrected_word).fix_type);

        // `is_noop` already excluded blank words, so compiling only fails on
        // a pattern the regex engine rejects; that change matches nowhere.
        let matches = match self.matcher.compile(&change.original_word) {
            Some(pattern) => locations
                .iter()
                .filter_map(|location| {
                    let found = pattern.find(&location.text);
                    if found.is_empty() {
                        return None;
                    }
                    let preview = build_preview(&location.text, &found, &change.corrected_word);
                    Some(LocationMatch {
                        location_id: location.id.clone(),
                        ordering_index: location.ordering_index,
                        page_number: location.page_number,
                        occurrences: found.len(),
                        preview_before: preview.before,
                        preview_after: preview.after,
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        Suggestion {
            original_word: change.original_word.clone(),
            corrected_word: change.corrected_word.clone(),
            fix_type,
            locations: matches,
        }
    }
}
