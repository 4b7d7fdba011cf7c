//! Whole-token matching.
//!
//! A candidate found by literal search is accepted only when the characters
//! on both sides separate it from its neighbours. Hyphens split compounds,
//! letters never do, and digit runs have extra rules so that parts of
//! decimals and the `ב־2` date idiom are left alone.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use tikkun_core::script::{
    MAQAF, closes_abbreviation, is_boundary_punctuation, is_decimal_separator, is_digit,
    is_prefix_letter, is_quote_mark, is_word_char,
};

/// Policy for single-letter function words fused to the front of a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMode {
    /// A letter before the candidate always disqualifies it.
    #[default]
    Restrictive,
    /// Accept `ו`/`ה`/`ב`/... directly before the candidate when that letter
    /// itself starts a token.
    AllowAttached,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    #[serde(default)]
    pub prefix_mode: PrefixMode,
}

/// One accepted occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Offset of the first character counted in `char`s.
    pub char_offset: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryMatcher {
    options: MatchOptions,
}

impl BoundaryMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Prepare `word` for searching many texts.
    ///
    /// `None` for an empty or whitespace-only word.
    pub fn compile(&self, word: &str) -> Option<WordPattern> {
        if word.trim().is_empty() {
            return None;
        }
        match Regex::new(&regex::escape(word)) {
            Ok(pattern) => Some(WordPattern {
                prefix_mode: self.options.prefix_mode,
                first: word.chars().next(),
                last: word.chars().next_back(),
                pattern,
            }),
            Err(e) => {
                warn!(word, error = %e, "could not build pattern for word");
                None
            }
        }
    }

    /// All standalone occurrences of `word` in `text`, left to right.
    ///
    /// An empty or whitespace-only `word` yields nothing.
    pub fn find(&self, text: &str, word: &str) -> Vec<Match> {
        self.compile(word)
            .map(|p| p.find(text))
            .unwrap_or_default()
    }

    /// Character offsets of every standalone occurrence.
    pub fn positions(&self, text: &str, word: &str) -> Vec<usize> {
        self.compile(word)
            .map(|p| p.positions(text))
            .unwrap_or_default()
    }

    pub fn count(&self, text: &str, word: &str) -> usize {
        self.find(text, word).len()
    }

    /// Replace every standalone occurrence in one left-to-right pass.
    /// Everything outside the matches is copied through untouched.
    pub fn replace(&self, text: &str, word: &str, replacement: &str) -> String {
        match self.compile(word) {
            Some(p) => p.replace(text, replacement),
            None => text.to_string(),
        }
    }
}

/// A word ready to be matched against any number of texts.
#[derive(Debug, Clone)]
pub struct WordPattern {
    prefix_mode: PrefixMode,
    first: Option<char>,
    last: Option<char>,
    pattern: Regex,
}

impl WordPattern {
    pub fn find(&self, text: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(candidate) = self.pattern.find_at(text, pos) else {
                break;
            };
            let (start, end) = (candidate.start(), candidate.end());

            if self.boundary_before(text, start) && self.boundary_after(text, end) {
                matches.push(Match {
                    start,
                    end,
                    char_offset: text[..start].chars().count(),
                });
                pos = end;
            } else {
                // Retry one character further on; a rejected candidate may
                // overlap an acceptable one.
                pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
        matches
    }

    pub fn positions(&self, text: &str) -> Vec<usize> {
        self.find(text).into_iter().map(|m| m.char_offset).collect()
    }

    pub fn replace(&self, text: &str, replacement: &str) -> String {
        splice(text, &self.find(text), replacement)
    }

    fn boundary_before(&self, text: &str, start: usize) -> bool {
        let mut preceding = text[..start].chars().rev();
        let Some(prev) = preceding.next() else {
            return true;
        };
        let before_prev = preceding.clone().next();
        let first = self.first;

        if first.is_some_and(is_digit) {
            if is_digit(prev) {
                return false;
            }
            if is_decimal_separator(prev) && before_prev.is_some_and(is_digit) {
                return false;
            }
            // `ב־2`: a maqaf fusing the number to a preceding letter. Narrower
            // than the generic hyphen rule below, which keeps hyphens as
            // boundaries everywhere else.
            if prev == MAQAF && before_prev.is_some_and(is_word_char) {
                return false;
            }
        }

        if prev.is_whitespace() {
            return true;
        }
        if is_quote_mark(prev) {
            return !(before_prev.is_some_and(is_word_char) && first.is_some_and(is_word_char));
        }
        if is_boundary_punctuation(prev) {
            return true;
        }
        if self.prefix_mode == PrefixMode::AllowAttached && is_prefix_letter(prev) {
            return before_prev.is_none_or(|c| c.is_whitespace() || is_boundary_punctuation(c));
        }
        false
    }

    fn boundary_after(&self, text: &str, end: usize) -> bool {
        let mut following = text[end..].chars();
        let Some(next) = following.next() else {
            return true;
        };
        let after_next = following.next();
        let last = self.last;

        if last.is_some_and(is_digit) {
            if is_digit(next) {
                return false;
            }
            if is_decimal_separator(next) && after_next.is_some_and(is_digit) {
                return false;
            }
        }

        if next.is_whitespace() {
            return true;
        }
        // `מס׳`: the mark belongs to the token, whatever follows it.
        if last.is_some_and(|l| closes_abbreviation(l, next)) {
            return false;
        }
        if is_quote_mark(next) {
            return !(last.is_some_and(is_word_char) && after_next.is_some_and(is_word_char));
        }
        is_boundary_punctuation(next)
    }
}

/// Substitute `replacement` for each match. `matches` must be sorted and
/// non-overlapping, as returned by [`BoundaryMatcher::find`].
pub(crate) fn splice(text: &str, matches: &[Match], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in matches {
        out.push_str(&text[last..m.start]);
        out.push_str(replacement);
        last = m.end;
    }
    out.push_str(&text[last..]);
    out
}

/// [`BoundaryMatcher::find`] with default (restrictive) options.
pub fn find_standalone_matches(text: &str, word: &str) -> Vec<Match> {
    BoundaryMatcher::default().find(text, word)
}

/// [`BoundaryMatcher::positions`] with default (restrictive) options.
pub fn find_positions(text: &str, word: &str) -> Vec<usize> {
    BoundaryMatcher::default().positions(text, word)
}

/// [`BoundaryMatcher::replace`] with default (restrictive) options.
pub fn replace_standalone(text: &str, word: &str, replacement: &str) -> String {
    BoundaryMatcher::default().replace(text, word, replacement)
}
