use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::correction::FixType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleMatch {
    pub fix_type: FixType,
    pub confidence: f64,
}

/// Verdict for one `(original, corrected)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    pub fix_type: FixType,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub reason: String,
    /// Every rule that matched, in priority order. The first entry is the winner.
    pub matches: Vec<RuleMatch>,
}
