use std::ops::Range;

use tikkun_core::script::{is_digit, is_sentence_terminator};

/// Byte ranges of the sentences in `text`, covering it end to end.
///
/// A sentence runs up to and including its terminator run (`?!`, `...`);
/// the whitespace after it belongs to the next sentence. A `.` between two
/// digits is part of a number, not a terminator. Text after the last
/// terminator forms a final sentence.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !terminates_at(&chars, i) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && terminates_at(&chars, j) {
            j += 1;
        }
        let end = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
        spans.push(start..end);
        start = end;
        i = j;
    }

    if start < text.len() {
        spans.push(start..text.len());
    }
    spans
}

fn terminates_at(chars: &[(usize, char)], i: usize) -> bool {
    let c = chars[i].1;
    if !is_sentence_terminator(c) {
        return false;
    }
    if c == '.' {
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|(_, c)| *c);
        if prev.is_some_and(is_digit) && next.is_some_and(is_digit) {
            return false;
        }
    }
    true
}
