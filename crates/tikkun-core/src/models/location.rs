use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An ordered unit of text (a paragraph) inside a collection (a book).
///
/// Owned by the ingestion side; the engine only reads it, checks
/// `completed`, and rewrites `text` when a bulk fix is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Location {
    pub id: String,
    pub collection_id: String,
    pub ordering_index: u32,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Finalized locations never receive propagated fixes.
    #[serde(default)]
    pub completed: bool,
    pub text: String,
}
