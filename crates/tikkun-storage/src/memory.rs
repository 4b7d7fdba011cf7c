use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use tikkun_core::models::correction::{ChainKey, CorrectionRecord};
use tikkun_core::models::location::Location;

use crate::error::StorageError;
use crate::query::RecordQuery;
use crate::store::{ChainTransaction, CorrectionStore, LocationStore};

/// In-process store.
///
/// Corrections live in an append-only arena indexed by chain; a deleted
/// record leaves an empty slot behind. Each chain has its own lock, so
/// writers on different chains never wait on each other.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    chain_locks: Mutex<HashMap<ChainKey, Arc<Mutex<()>>>>,
}

#[derive(Default)]
pub(crate) struct Tables {
    records: Vec<Option<CorrectionRecord>>,
    by_id: HashMap<Uuid, usize>,
    /// Arena slots of each chain, ascending by sequence.
    chains: HashMap<ChainKey, Vec<usize>>,
    locations: BTreeMap<String, Location>,
}

impl Tables {
    fn chain_records(&self, key: &ChainKey) -> Vec<CorrectionRecord> {
        self.chains
            .get(key)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|slot| self.records[*slot].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn live(&self) -> impl Iterator<Item = &CorrectionRecord> {
        self.records.iter().flatten()
    }

    /// Append a record to the arena and its chain.
    pub(crate) fn push(&mut self, record: CorrectionRecord) -> Result<(), StorageError> {
        if self.by_id.contains_key(&record.id) {
            return Err(StorageError::Transaction(format!(
                "duplicate correction id {}",
                record.id
            )));
        }
        let slot = self.records.len();
        self.by_id.insert(record.id, slot);
        self.chains.entry(record.chain_key()).or_default().push(slot);
        self.records.push(Some(record));
        Ok(())
    }

    /// Write a chain's new state back: existing records are updated in
    /// place, new ones appended, missing ones emptied.
    fn replace_chain(&mut self, key: &ChainKey, chain: Vec<CorrectionRecord>) {
        let keep: HashSet<Uuid> = chain.iter().map(|r| r.id).collect();
        for slot in self.chains.remove(key).unwrap_or_default() {
            if let Some(old) = &self.records[slot]
                && !keep.contains(&old.id)
            {
                self.by_id.remove(&old.id);
                self.records[slot] = None;
            }
        }

        let mut slots = Vec::with_capacity(chain.len());
        for record in chain {
            match self.by_id.get(&record.id) {
                Some(&slot) => {
                    slots.push(slot);
                    self.records[slot] = Some(record);
                }
                None => {
                    let slot = self.records.len();
                    self.by_id.insert(record.id, slot);
                    self.records.push(Some(record));
                    slots.push(slot);
                }
            }
        }
        if !slots.is_empty() {
            self.chains.insert(key.clone(), slots);
        }
    }

    pub(crate) fn insert_location(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    pub(crate) fn all_records(&self) -> Vec<CorrectionRecord> {
        self.live().cloned().collect()
    }

    pub(crate) fn all_locations(&self) -> Vec<Location> {
        self.locations.values().cloned().collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
            chain_locks: Mutex::default(),
        }
    }

    pub(crate) async fn read_tables(&self) -> tokio::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Number of chains with a live lock entry.
    pub async fn tracked_chains(&self) -> usize {
        self.chain_locks.lock().await.len()
    }

    async fn chain_lock(&self, key: &ChainKey) -> Arc<Mutex<()>> {
        let mut locks = self.chain_locks.lock().await;
        locks.entry(key.clone()).or_default().clone()
    }
}

impl LocationStore for MemoryStore {
    async fn list_locations(
        &self,
        collection_id: &str,
        exclude_id: Option<&str>,
        include_completed: bool,
    ) -> Result<Vec<Location>, StorageError> {
        let tables = self.tables.read().await;
        let mut locations: Vec<Location> = tables
            .locations
            .values()
            .filter(|l| l.collection_id == collection_id)
            .filter(|l| exclude_id != Some(l.id.as_str()))
            .filter(|l| include_completed || !l.completed)
            .cloned()
            .collect();
        locations.sort_by_key(|l| l.ordering_index);
        Ok(locations)
    }

    async fn get_location(&self, id: &str) -> Result<Option<Location>, StorageError> {
        Ok(self.tables.read().await.locations.get(id).cloned())
    }

    async fn put_location(&self, location: Location) -> Result<(), StorageError> {
        self.tables.write().await.insert_location(location);
        Ok(())
    }

    async fn update_text(&self, id: &str, text: String) -> Result<Location, StorageError> {
        let mut tables = self.tables.write().await;
        let location = tables
            .locations
            .get_mut(id)
            .ok_or_else(|| StorageError::LocationNotFound { id: id.to_string() })?;
        location.text = text;
        Ok(location.clone())
    }
}

impl CorrectionStore for MemoryStore {
    type Chain<'a> = MemoryChain<'a>;

    async fn begin_chain(&self, key: &ChainKey) -> Result<MemoryChain<'_>, StorageError> {
        let guard = self.chain_lock(key).await.lock_owned().await;
        let records = self.tables.read().await.chain_records(key);
        debug!(
            location_id = %key.location_id,
            original_word = %key.original_word,
            existing = records.len(),
            "chain transaction opened"
        );
        Ok(MemoryChain {
            store: self,
            key: key.clone(),
            records,
            ops: Vec::new(),
            _guard: guard,
        })
    }

    async fn chain(&self, key: &ChainKey) -> Result<Vec<CorrectionRecord>, StorageError> {
        Ok(self.tables.read().await.chain_records(key))
    }

    async fn location_records(
        &self,
        location_id: &str,
    ) -> Result<Vec<CorrectionRecord>, StorageError> {
        let tables = self.tables.read().await;
        let mut records: Vec<CorrectionRecord> = tables
            .live()
            .filter(|r| r.location_id == location_id)
            .cloned()
            .collect();
        sort_by_creation(&mut records);
        Ok(records)
    }

    async fn query(&self, query: &RecordQuery) -> Result<Vec<CorrectionRecord>, StorageError> {
        let tables = self.tables.read().await;
        let mut records: Vec<CorrectionRecord> =
            tables.live().filter(|r| query.matches(r)).cloned().collect();
        sort_by_creation(&mut records);
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CorrectionRecord>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_id
            .get(&id)
            .and_then(|slot| tables.records[*slot].clone()))
    }
}

fn sort_by_creation(records: &mut [CorrectionRecord]) {
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.fix_sequence.cmp(&b.fix_sequence))
    });
}

enum ChainOp {
    ClearLatest,
    MarkLatest(Uuid),
    Insert(CorrectionRecord),
    Remove(Uuid),
}

/// A transaction on one chain of a [`MemoryStore`]. Holds the chain lock
/// until committed or dropped.
pub struct MemoryChain<'a> {
    store: &'a MemoryStore,
    key: ChainKey,
    records: Vec<CorrectionRecord>,
    ops: Vec<ChainOp>,
    _guard: OwnedMutexGuard<()>,
}

impl ChainTransaction for MemoryChain<'_> {
    fn records(&self) -> &[CorrectionRecord] {
        &self.records
    }

    fn clear_latest(&mut self) {
        self.ops.push(ChainOp::ClearLatest);
    }

    fn mark_latest(&mut self, id: Uuid) {
        self.ops.push(ChainOp::MarkLatest(id));
    }

    fn insert(&mut self, record: CorrectionRecord) {
        self.ops.push(ChainOp::Insert(record));
    }

    fn remove(&mut self, id: Uuid) {
        self.ops.push(ChainOp::Remove(id));
    }

    async fn commit(self) -> Result<(), StorageError> {
        let mut tables = self.store.tables.write().await;

        // Build the chain's next state off to the side; the tables are only
        // touched once every op has applied cleanly.
        let mut chain = tables.chain_records(&self.key);
        for op in self.ops {
            match op {
                ChainOp::ClearLatest => {
                    for record in &mut chain {
                        record.is_latest_fix = false;
                    }
                }
                ChainOp::MarkLatest(id) => {
                    let record = chain
                        .iter_mut()
                        .find(|r| r.id == id)
                        .ok_or(StorageError::CorrectionNotFound { id })?;
                    record.is_latest_fix = true;
                }
                ChainOp::Insert(record) => {
                    if record.chain_key() != self.key {
                        return Err(StorageError::Transaction(format!(
                            "record {} does not belong to chain ({}, {})",
                            record.id, self.key.location_id, self.key.original_word
                        )));
                    }
                    if chain.iter().any(|r| r.id == record.id)
                        || tables.by_id.contains_key(&record.id)
                    {
                        return Err(StorageError::Transaction(format!(
                            "duplicate correction id {}",
                            record.id
                        )));
                    }
                    chain.push(record);
                }
                ChainOp::Remove(id) => {
                    let before = chain.len();
                    chain.retain(|r| r.id != id);
                    if chain.len() == before {
                        return Err(StorageError::CorrectionNotFound { id });
                    }
                }
            }
        }
        chain.sort_by_key(|r| r.fix_sequence);

        let emptied = chain.is_empty();
        tables.replace_chain(&self.key, chain);
        drop(tables);

        if emptied {
            // The map and this transaction's guard are the only holders
            // unless another writer is already queued on the chain.
            let mut locks = self.store.chain_locks.lock().await;
            if locks
                .get(&self.key)
                .is_some_and(|lock| Arc::strong_count(lock) <= 2)
            {
                locks.remove(&self.key);
                debug!(
                    location_id = %self.key.location_id,
                    original_word = %self.key.original_word,
                    "chain lock released"
                );
            }
        }
        Ok(())
    }
}
