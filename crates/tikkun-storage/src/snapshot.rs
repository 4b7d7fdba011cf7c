//! JSON snapshots of a [`MemoryStore`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use tikkun_core::models::correction::CorrectionRecord;
use tikkun_core::models::location::Location;

use crate::error::StorageError;
use crate::memory::{MemoryStore, Tables};

/// Current snapshot format. Bump when the shape changes.
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub snapshot_version: u32,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub records: Vec<CorrectionRecord>,
}

impl MemoryStore {
    /// Copy of every location and record.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let tables = self.read_tables().await;
        StoreSnapshot {
            snapshot_version: CURRENT_VERSION,
            locations: tables.all_locations(),
            records: tables.all_records(),
        }
    }

    /// Build a store from a snapshot, rebuilding the chain index.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StorageError> {
        if snapshot.snapshot_version > CURRENT_VERSION {
            return Err(StorageError::Corrupt(format!(
                "snapshot_version {} is newer than this build supports ({CURRENT_VERSION})",
                snapshot.snapshot_version
            )));
        }

        let mut tables = Tables::default();
        for location in snapshot.locations {
            tables.insert_location(location);
        }

        let mut records = snapshot.records;
        records.sort_by(|a, b| {
            a.chain_key()
                .cmp(&b.chain_key())
                .then(a.fix_sequence.cmp(&b.fix_sequence))
        });
        for record in records {
            if record.aggregation_key != record.key().as_str() {
                return Err(StorageError::Corrupt(format!(
                    "record {} has aggregation_key {:?}, expected {:?}",
                    record.id,
                    record.aggregation_key,
                    record.key().as_str()
                )));
            }
            tables
                .push(record)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        }
        Ok(Self::from_tables(tables))
    }

    /// Write a snapshot to `path` atomically (temp file, then rename).
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), StorageError> {
        let snapshot = self.snapshot().await;
        let body = serde_json::to_vec_pretty(&snapshot)?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &body).await?;
        tokio::fs::rename(&tmp_path, path).await?;

        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            locations = snapshot.locations.len(),
            "snapshot saved"
        );
        Ok(())
    }

    pub async fn load_snapshot(path: &Path) -> Result<Self, StorageError> {
        let body = tokio::fs::read(path).await?;
        let snapshot: StoreSnapshot = serde_json::from_slice(&body)?;
        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            locations = snapshot.locations.len(),
            "snapshot loaded"
        );
        Self::from_snapshot(snapshot)
    }
}
