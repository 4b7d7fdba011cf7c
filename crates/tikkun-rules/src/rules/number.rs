use tikkun_core::script::{is_decimal_separator, is_digit, is_word_char};

/// A number replaced by its spoken form: `2` → `שתי`, `1.5` → `אחת וחצי`.
pub fn matches(original: &str, corrected: &str) -> bool {
    is_number(original)
        && !corrected.chars().any(is_digit)
        && corrected.chars().any(is_word_char)
}

fn is_number(s: &str) -> bool {
    let (Some(first), Some(last)) = (s.chars().next(), s.chars().next_back()) else {
        return false;
    };
    is_digit(first)
        && is_digit(last)
        && s.chars().all(|c| is_digit(c) || is_decimal_separator(c))
}
