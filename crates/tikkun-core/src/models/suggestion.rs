use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::correction::FixType;

/// A sibling location that contains the uncorrected word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocationMatch {
    pub location_id: String,
    pub ordering_index: u32,
    pub page_number: Option<u32>,
    pub occurrences: usize,
    /// The sentence(s) containing the word, as they stand.
    pub preview_before: String,
    /// The same sentence(s) with every standalone occurrence replaced.
    pub preview_after: String,
}

/// A proposal to propagate one accepted change across a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    pub original_word: String,
    pub corrected_word: String,
    pub fix_type: FixType,
    /// Empty when nothing else in the collection needs the fix.
    pub locations: Vec<LocationMatch>,
}

/// What happened at one location during a bulk apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum BulkOutcome {
    Applied {
        location_id: String,
        replacements: usize,
    },
    Skipped {
        location_id: String,
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SkipReason {
    Completed,
    NoOccurrences,
    OtherCollection,
    NotFound,
}
