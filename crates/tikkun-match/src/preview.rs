use std::ops::Range;

use crate::boundary::{Match, splice};
use crate::sentence::sentence_spans;

/// Before/after context for a set of matches in one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub before: String,
    pub after: String,
}

/// Cut the sentences that contain `matches` out of `text`.
///
/// `before` is those sentences as they stand, trimmed and joined by a single
/// space; `after` is the same sentences with each match replaced by
/// `replacement`. Sentences without a match are left out of both.
pub fn build_preview(text: &str, matches: &[Match], replacement: &str) -> Preview {
    let groups = matched_ranges(text, matches);

    let mut before = Vec::with_capacity(groups.len());
    let mut after = Vec::with_capacity(groups.len());
    for range in groups {
        let local: Vec<Match> = matches
            .iter()
            .filter(|m| m.start >= range.start && m.end <= range.end)
            .map(|m| Match {
                start: m.start - range.start,
                end: m.end - range.start,
                char_offset: m.char_offset,
            })
            .collect();
        let sentence = &text[range];
        before.push(sentence.trim().to_string());
        after.push(splice(sentence, &local, replacement).trim().to_string());
    }

    Preview {
        before: before.join(" "),
        after: after.join(" "),
    }
}

/// The trimmed sentence containing `m`.
pub fn sentence_context(text: &str, m: &Match) -> String {
    matched_ranges(text, std::slice::from_ref(m))
        .first()
        .map(|r| text[r.clone()].trim().to_string())
        .unwrap_or_default()
}

/// Sentence ranges touched by any match, merged when a match straddles a
/// terminator, in text order.
fn matched_ranges(text: &str, matches: &[Match]) -> Vec<Range<usize>> {
    let spans = sentence_spans(text);
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for m in matches {
        let Some(first) = spans.iter().find(|s| s.contains(&m.start)) else {
            continue;
        };
        let last_byte = m.end.saturating_sub(1).max(m.start);
        let end = spans
            .iter()
            .find(|s| s.contains(&last_byte))
            .map_or(first.end, |s| s.end);
        let range = first.start..end;

        match ranges.last_mut() {
            Some(prev) if range.start < prev.end => prev.end = prev.end.max(range.end),
            _ => ranges.push(range),
        }
    }
    ranges
}
