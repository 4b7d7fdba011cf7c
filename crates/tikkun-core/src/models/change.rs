use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::correction::FixType;

/// One substitution found by diffing two versions of a location's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordChange {
    pub original_word: String,
    pub corrected_word: String,
    pub position: usize,
    #[serde(default)]
    pub fix_type: Option<FixType>,
}

impl WordChange {
    pub fn new(original_word: impl Into<String>, corrected_word: impl Into<String>) -> Self {
        Self {
            original_word: original_word.into(),
            corrected_word: corrected_word.into(),
            position: 0,
            fix_type: None,
        }
    }

    /// Identical words, or an empty side, carry nothing to propagate.
    pub fn is_noop(&self) -> bool {
        let original = self.original_word.trim();
        let corrected = self.corrected_word.trim();
        original.is_empty() || corrected.is_empty() || self.original_word == self.corrected_word
    }
}

/// An edit made to one location, carrying every word it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditEvent {
    pub collection_id: String,
    pub location_id: String,
    pub changes: Vec<WordChange>,
}
