use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid aggregation key: {0}")]
    InvalidAggregationKey(String),

    #[error("unknown fix type: {0}")]
    UnknownFixType(String),
}
