//! Character tables for Hebrew-script text.
//!
//! Pure `char` predicates shared by the matcher and the classifier. These
//! define which characters separate words, which end sentences and which
//! are optional vowel marks.

/// Hebrew hyphen (maqaf), used to fuse compounds and the `ב־2` date idiom.
pub const MAQAF: char = '\u{05BE}';

/// Hebrew abbreviation marks.
pub const GERESH: char = '\u{05F3}';
pub const GERSHAYIM: char = '\u{05F4}';

/// Single-letter function words that attach to the following word
/// (and, the, in, like, to, from, that).
pub const PREFIX_LETTERS: &[char] = &['ו', 'ה', 'ב', 'כ', 'ל', 'מ', 'ש'];

/// Punctuation that separates tokens.
pub const BOUNDARY_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '`', '-',
    '/', '\\', '|', '*', '…', '–', '—', '«', '»', '“', '”', '„', '‘', '’', MAQAF, GERESH,
    GERSHAYIM, '\u{05C0}', '\u{05C3}', '\u{0589}',
];

/// Quotation marks that double as abbreviation marks inside a word (`צה"ל`).
pub const QUOTE_MARKS: &[char] = &['"', '\'', GERESH, GERSHAYIM];

/// Characters that end a sentence for preview purposes.
pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', ';', '\u{05C3}', '\u{0589}', '\n'];

/// Separators that join the digits of a decimal number (`1.2`, `1,000`).
pub const DECIMAL_SEPARATORS: &[char] = &['.', ','];

pub fn is_boundary_punctuation(c: char) -> bool {
    BOUNDARY_PUNCTUATION.contains(&c)
}

pub fn is_quote_mark(c: char) -> bool {
    QUOTE_MARKS.contains(&c)
}

pub fn is_sentence_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

pub fn is_decimal_separator(c: char) -> bool {
    DECIMAL_SEPARATORS.contains(&c)
}

pub fn is_prefix_letter(c: char) -> bool {
    PREFIX_LETTERS.contains(&c)
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Hebrew base letters, final forms included.
pub fn is_hebrew_letter(c: char) -> bool {
    ('\u{05D0}'..='\u{05EA}').contains(&c)
}

/// Whether `mark` directly after `letter` closes an abbreviation (`מס׳`,
/// `ד׳`) rather than a quotation. An ASCII apostrophe after a Hebrew
/// letter is read as a typed geresh. A trailing gershayim is a closing
/// quote: abbreviations put it before their last letter.
pub fn closes_abbreviation(letter: char, mark: char) -> bool {
    match mark {
        GERESH => is_word_char(letter),
        '\'' => is_hebrew_letter(letter) || is_niqqud(letter),
        _ => false,
    }
}

/// Vowel points and cantillation marks.
///
/// The Hebrew combining block also holds a few punctuation characters
/// (maqaf, paseq, sof pasuq, nun hafukha) which are not marks.
pub fn is_niqqud(c: char) -> bool {
    matches!(
        c,
        '\u{0591}'..='\u{05BD}'
            | '\u{05BF}'
            | '\u{05C1}'..='\u{05C2}'
            | '\u{05C4}'..='\u{05C5}'
            | '\u{05C7}'
    )
}

/// Remove every vowel point and cantillation mark.
pub fn strip_niqqud(s: &str) -> String {
    s.chars().filter(|c| !is_niqqud(*c)).collect()
}

pub fn niqqud_count(s: &str) -> usize {
    s.chars().filter(|c| is_niqqud(*c)).count()
}

/// True when the string has at least one character and all are ASCII digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_digit)
}

/// A letter for word-boundary purposes: anything alphabetic, which for
/// Hebrew includes the vowel points.
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || is_niqqud(c)
}
