use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("location not found: {id}")]
    LocationNotFound { id: String },

    #[error("correction not found: {id}")]
    CorrectionNotFound { id: Uuid },

    #[error("transaction aborted: {0}")]
    Transaction(String),

    #[error("snapshot corrupted: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
