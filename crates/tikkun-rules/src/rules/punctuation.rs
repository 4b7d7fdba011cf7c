use tikkun_core::script::is_boundary_punctuation;

/// Only punctuation or spacing changed: `שלום,` → `שלום`, `בית ספר` → `בית־ספר`.
pub fn matches(original: &str, corrected: &str) -> bool {
    if original == corrected {
        return false;
    }
    let bare = strip_punctuation(original);
    !bare.is_empty() && bare == strip_punctuation(corrected)
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| !is_boundary_punctuation(*c) && !c.is_whitespace())
        .collect()
}
