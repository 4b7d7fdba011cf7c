//! tikkun-match
//!
//! Standalone-occurrence matching for Hebrew-script text. Decides whether a
//! substring is a whole token, replaces whole tokens, and cuts sentence
//! previews around matches. Pure and synchronous.

pub mod boundary;
pub mod preview;
pub mod sentence;

pub use boundary::{
    BoundaryMatcher, Match, MatchOptions, PrefixMode, WordPattern, find_positions,
    find_standalone_matches, replace_standalone,
};
pub use preview::{Preview, build_preview, sentence_context};
pub use sentence::sentence_spans;
