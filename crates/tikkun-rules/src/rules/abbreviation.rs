use tikkun_core::script::{is_niqqud, is_quote_mark, is_word_char};

/// An abbreviation written out: `ד"ר` → `דוקטור`, `מס'` → `מספר`.
///
/// The original carries a geresh or gershayim after a letter; the
/// correction carries none and is longer.
pub fn matches(original: &str, corrected: &str) -> bool {
    has_abbreviation_mark(original)
        && !corrected.chars().any(is_quote_mark)
        && letter_count(corrected) > letter_count(original)
}

fn has_abbreviation_mark(s: &str) -> bool {
    let mut prev = None;
    for c in s.chars() {
        if is_quote_mark(c) && prev.is_some_and(is_word_char) {
            return true;
        }
        prev = Some(c);
    }
    false
}

fn letter_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_alphabetic() && !is_niqqud(*c)).count()
}
