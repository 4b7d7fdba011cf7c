use std::future::Future;

use uuid::Uuid;

use tikkun_core::models::correction::{ChainKey, CorrectionRecord};
use tikkun_core::models::location::Location;

use crate::error::StorageError;
use crate::query::RecordQuery;

/// Read model of the locations produced by ingestion.
pub trait LocationStore: Send + Sync {
    /// Locations of a collection in ordering-index order, optionally
    /// excluding one id and any location flagged `completed`.
    fn list_locations(
        &self,
        collection_id: &str,
        exclude_id: Option<&str>,
        include_completed: bool,
    ) -> impl Future<Output = Result<Vec<Location>, StorageError>> + Send;

    fn get_location(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Location>, StorageError>> + Send;

    /// Insert or replace a location. Used by ingestion and fixtures.
    fn put_location(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Replace a location's text, returning the updated location.
    fn update_text(
        &self,
        id: &str,
        text: String,
    ) -> impl Future<Output = Result<Location, StorageError>> + Send;
}

/// The correction table.
///
/// Writes go through a [`ChainTransaction`] scoped to one chain; reads see
/// committed state only.
pub trait CorrectionStore: Send + Sync {
    type Chain<'a>: ChainTransaction
    where
        Self: 'a;

    /// Open a transaction on one chain. While it is open, no other
    /// transaction on the same chain can begin; other chains are unaffected.
    fn begin_chain(
        &self,
        key: &ChainKey,
    ) -> impl Future<Output = Result<Self::Chain<'_>, StorageError>> + Send;

    /// Committed records of one chain, ascending by sequence.
    fn chain(
        &self,
        key: &ChainKey,
    ) -> impl Future<Output = Result<Vec<CorrectionRecord>, StorageError>> + Send;

    /// Every record of one location, ascending by creation time.
    fn location_records(
        &self,
        location_id: &str,
    ) -> impl Future<Output = Result<Vec<CorrectionRecord>, StorageError>> + Send;

    /// Records matching `query`, ascending by creation time.
    fn query(
        &self,
        query: &RecordQuery,
    ) -> impl Future<Output = Result<Vec<CorrectionRecord>, StorageError>> + Send;

    fn get(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<CorrectionRecord>, StorageError>> + Send;
}

/// Staged writes against one chain.
///
/// Nothing is visible to readers until [`commit`](Self::commit) succeeds.
/// Dropping the transaction discards every staged write.
pub trait ChainTransaction: Send {
    /// The chain as it stood when the transaction began, ascending by sequence.
    fn records(&self) -> &[CorrectionRecord];

    /// Flip `is_latest_fix` to false on every record of the chain.
    fn clear_latest(&mut self);

    /// Flip `is_latest_fix` to true on one record of the chain.
    fn mark_latest(&mut self, id: Uuid);

    fn insert(&mut self, record: CorrectionRecord);

    fn remove(&mut self, id: Uuid);

    /// Apply every staged write at once, or none of them.
    fn commit(self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
