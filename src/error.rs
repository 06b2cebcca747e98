/**
* filename : error
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid trade {id}: {reason}")]
    InvalidTrade { id: i64, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Worker error: {0}")]
    WorkerError(String),
}

impl AnalyticsError {
    pub fn invalid_trade(id: i64, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidTrade { id, reason: reason.into() }
    }
}
