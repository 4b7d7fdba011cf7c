use jiff::Timestamp;

use tikkun_core::models::correction::{CorrectionRecord, FixType};

/// Filter over stored corrections. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub collection_id: Option<String>,
    /// Substring of the original word.
    pub original_word: Option<String>,
    /// Substring of the corrected word.
    pub corrected_word: Option<String>,
    pub fix_type: Option<FixType>,
    /// Exact aggregation key.
    pub aggregation_key: Option<String>,
    /// Inclusive lower bound on creation time.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on creation time.
    pub created_to: Option<Timestamp>,
}

impl RecordQuery {
    pub fn matches(&self, record: &CorrectionRecord) -> bool {
        if let Some(id) = &self.collection_id
            && record.collection_id != *id
        {
            return false;
        }
        if let Some(word) = &self.original_word
            && !record.original_word.contains(word.as_str())
        {
            return false;
        }
        if let Some(word) = &self.corrected_word
            && !record.corrected_word.contains(word.as_str())
        {
            return false;
        }
        if self.fix_type.is_some_and(|t| t != record.fix_type) {
            return false;
        }
        if let Some(key) = &self.aggregation_key
            && record.aggregation_key != *key
        {
            return false;
        }
        if self.created_from.is_some_and(|from| record.created_at < from) {
            return false;
        }
        !self.created_to.is_some_and(|to| record.created_at > to)
    }
}
