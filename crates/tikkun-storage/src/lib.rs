//! tikkun-storage
//!
//! Persistence seams for the engine: the location read model, the
//! correction table with per-chain transactions, an in-memory
//! implementation, and JSON snapshots of it.

pub mod error;
pub mod memory;
pub mod query;
pub mod snapshot;
pub mod store;

pub use memory::MemoryStore;
pub use query::RecordQuery;
pub use store::{ChainTransaction, CorrectionStore, LocationStore};
