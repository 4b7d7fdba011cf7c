use tikkun_core::script::{is_numeric, strip_niqqud};

/// A different word of the same length: `תלה` → `טלה`.
///
/// Numeric originals are excluded so digit expansions never tie with this
/// rule.
pub fn matches(original: &str, corrected: &str) -> bool {
    if is_numeric(original) {
        return false;
    }
    let original = strip_niqqud(original);
    let corrected = strip_niqqud(corrected);
    !original.is_empty()
        && original != corrected
        && original.chars().count() == corrected.chars().count()
}
