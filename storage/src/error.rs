//! Storage error types.
//!
//! Returned by [`DocumentDriver`](crate::DocumentDriver) implementations. The provider
//! never hands these to callers directly; they are folded into a
//! [`StorageResponse::Failure`](crate::StorageResponse) message.

use thiserror::Error;

/// Errors that can occur when talking to a document store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Not connected to the document store")]
    NotConnected,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
