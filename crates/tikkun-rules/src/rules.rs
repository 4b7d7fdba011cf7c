//! Predicates, one module per rule.

pub mod abbreviation;
pub mod disambiguation;
pub mod number;
pub mod punctuation;
pub mod vowelization;
