use tikkun_core::models::correction::FixType;

use crate::rules;

/// A classification rule. Declaration order in [`FixRule::ALL`] is priority
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixRule {
    NumberExpansion,
    AbbreviationExpansion,
    Vowelization,
    Punctuation,
    Disambiguation,
    Fallback,
}

impl FixRule {
    pub const ALL: [FixRule; 6] = [
        FixRule::NumberExpansion,
        FixRule::AbbreviationExpansion,
        FixRule::Vowelization,
        FixRule::Punctuation,
        FixRule::Disambiguation,
        FixRule::Fallback,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FixRule::NumberExpansion => "number_expansion",
            FixRule::AbbreviationExpansion => "abbreviation_expansion",
            FixRule::Vowelization => "vowelization",
            FixRule::Punctuation => "punctuation",
            FixRule::Disambiguation => "disambiguation",
            FixRule::Fallback => "fallback",
        }
    }

    pub fn fix_type(self) -> FixType {
        match self {
            FixRule::NumberExpansion | FixRule::AbbreviationExpansion => FixType::Expansion,
            FixRule::Vowelization => FixType::Vowelization,
            FixRule::Punctuation => FixType::Punctuation,
            FixRule::Disambiguation => FixType::Disambiguation,
            FixRule::Fallback => FixType::Default,
        }
    }

    /// Base confidence, in `[0, 1]`.
    pub fn confidence(self) -> f64 {
        match self {
            FixRule::NumberExpansion => 0.95,
            FixRule::AbbreviationExpansion => 0.85,
            FixRule::Vowelization => 0.9,
            FixRule::Punctuation => 0.85,
            FixRule::Disambiguation => 0.6,
            FixRule::Fallback => 0.3,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            FixRule::NumberExpansion => "digits spelled out as words",
            FixRule::AbbreviationExpansion => "abbreviation written out in full",
            FixRule::Vowelization => "vowel points added or changed",
            FixRule::Punctuation => "only punctuation differs",
            FixRule::Disambiguation => "same-length alternate spelling",
            FixRule::Fallback => "no specific pattern recognized",
        }
    }

    /// Whether this rule applies. Inputs are expected to be trimmed.
    pub fn matches(self, original: &str, corrected: &str) -> bool {
        match self {
            FixRule::NumberExpansion => rules::number::matches(original, corrected),
            FixRule::AbbreviationExpansion => rules::abbreviation::matches(original, corrected),
            FixRule::Vowelization => rules::vowelization::matches(original, corrected),
            FixRule::Punctuation => rules::punctuation::matches(original, corrected),
            FixRule::Disambiguation => rules::disambiguation::matches(original, corrected),
            FixRule::Fallback => true,
        }
    }
}
