//! tikkun-rules
//!
//! Fix classification. Pure functions over an `(original, corrected)` pair
//! with no I/O. Rules are a closed, ordered set; every matching
//! rule is reported and the highest-priority one wins.

pub mod rule;
pub mod rules;

use tracing::debug;

use tikkun_core::models::classification::{ClassificationResult, RuleMatch};

pub use rule::FixRule;

/// All rules in priority order.
pub fn all_rules() -> &'static [FixRule] {
    &FixRule::ALL
}

/// Look up a rule by its id (e.g. "number_expansion").
pub fn get_rule(id: &str) -> Option<FixRule> {
    all_rules().iter().copied().find(|r| r.id() == id)
}

/// Classify a correction.
pub fn classify(original: &str, corrected: &str) -> ClassificationResult {
    let original = original.trim();
    let corrected = corrected.trim();

    let matched: Vec<FixRule> = all_rules()
        .iter()
        .copied()
        .filter(|rule| rule.matches(original, corrected))
        .collect();

    // The fallback rule always matches, so `matched` is never empty.
    let winner = matched.first().copied().unwrap_or(FixRule::Fallback);
    debug!(
        original,
        corrected,
        rule = winner.id(),
        candidates = matched.len(),
        "classified correction"
    );

    ClassificationResult {
        fix_type: winner.fix_type(),
        confidence: winner.confidence(),
        reason: winner.reason().to_string(),
        matches: matched
            .iter()
            .map(|r| RuleMatch {
                fix_type: r.fix_type(),
                confidence: r.confidence(),
            })
            .collect(),
    }
}
