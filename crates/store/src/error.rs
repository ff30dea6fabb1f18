//! Errors raised while persisting collections.
//!
//! None of them are retried. They bubble up to the orchestrator, which
//! tears the session down and reports them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to connect to document store: {0}")]
    Connection(String),

    #[error("Failed to write collection {collection}: {reason}")]
    Write { collection: String, reason: String },

    #[error("Failed to convert document: {0}")]
    Serialize(#[from] mongodb::bson::ser::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WriteError {
    pub(crate) fn write(collection: &str, reason: impl ToString) -> Self {
        WriteError::Write {
            collection: collection.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WriteError>;
