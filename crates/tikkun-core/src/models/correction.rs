use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

use super::aggregation::AggregationKey;

/// Semantic category of a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FixType {
    /// Vowel points added or changed; the bare letters are unchanged.
    Vowelization,
    /// A digit run or abbreviation spelled out in full.
    Expansion,
    /// Only punctuation differs.
    Punctuation,
    /// Same-length alternate spelling of a word.
    Disambiguation,
    Default,
}

impl FixType {
    pub const ALL: [FixType; 5] = [
        FixType::Vowelization,
        FixType::Expansion,
        FixType::Punctuation,
        FixType::Disambiguation,
        FixType::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FixType::Vowelization => "vowelization",
            FixType::Expansion => "expansion",
            FixType::Punctuation => "punctuation",
            FixType::Disambiguation => "disambiguation",
            FixType::Default => "default",
        }
    }
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FixType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFixType(s.to_string()))
    }
}

/// Which synthesis voice and model were current when a fix was accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Provenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// Identifies a fix chain: every correction of one original word at one location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainKey {
    pub location_id: String,
    pub original_word: String,
}

impl ChainKey {
    pub fn new(location_id: impl Into<String>, original_word: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            original_word: original_word.into(),
        }
    }
}

/// A persisted, accepted correction.
///
/// Never mutated after creation except for `is_latest_fix`, which flips to
/// `false` when a newer record joins the same chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CorrectionRecord {
    pub id: Uuid,
    pub collection_id: String,
    pub location_id: String,
    /// The first surface form ever recorded for this chain.
    pub original_word: String,
    /// The word as it stood immediately before this fix.
    pub current_word: String,
    pub corrected_word: String,
    pub aggregation_key: String,
    pub sentence_context: String,
    pub fix_type: FixType,
    pub fix_sequence: u32,
    pub is_latest_fix: bool,
    pub created_at: jiff::Timestamp,
    #[serde(default)]
    pub provenance: Provenance,
}

impl CorrectionRecord {
    pub fn chain_key(&self) -> ChainKey {
        ChainKey::new(&self.location_id, &self.original_word)
    }

    /// Key identifying "the same correction" across locations.
    pub fn key(&self) -> AggregationKey {
        AggregationKey::new(&self.original_word, &self.corrected_word)
    }
}
