use tikkun_core::script::strip_niqqud;

/// Same letters, different vowel points: `שלום` → `שָׁלוֹם`.
pub fn matches(original: &str, corrected: &str) -> bool {
    original != corrected && strip_niqqud(original) == strip_niqqud(corrected)
}
