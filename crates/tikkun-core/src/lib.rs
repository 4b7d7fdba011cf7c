//! tikkun-core
//!
//! Pure domain types and Hebrew-script character tables.
//! No storage or async dependency. This is the shared vocabulary of the
//! correction engine.

pub mod error;
pub mod models;
pub mod script;
