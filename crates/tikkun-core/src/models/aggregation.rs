use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

use super::correction::FixType;

const SEPARATOR: char = '|';

/// `original|corrected`, computed identically wherever corrections are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationKey(String);

impl AggregationKey {
    pub fn new(original_word: &str, corrected_word: &str) -> Self {
        Self(format!("{original_word}{SEPARATOR}{corrected_word}"))
    }

    /// Split a key back into `(original, corrected)` at the first separator.
    pub fn parse(key: &str) -> Result<(String, String), CoreError> {
        key.split_once(SEPARATOR)
            .map(|(o, c)| (o.to_string(), c.to_string()))
            .ok_or_else(|| CoreError::InvalidAggregationKey(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AggregationKey> for String {
    fn from(key: AggregationKey) -> Self {
        key.0
    }
}

/// One row of the aggregated corrections view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregatedCorrection {
    pub aggregation_key: String,
    pub original_word: String,
    pub corrected_word: String,
    pub fix_type: FixType,
    /// Count after session deduplication.
    pub fix_count: usize,
    /// Creation time of the most recent raw record in the group.
    pub latest_correction: jiff::Timestamp,
    /// Distinct locations among the counted records, in first-seen order.
    pub location_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixTypeCount {
    pub fix_type: FixType,
    pub count: usize,
}

/// Read-only rollup over the stored corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CorrectionStats {
    pub total_corrections: usize,
    /// Distinct original words.
    pub unique_words: usize,
    pub fix_type_breakdown: Vec<FixTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopCorrection {
    pub original_word: String,
    pub corrected_word: String,
    pub fix_type: FixType,
    pub count: usize,
}
