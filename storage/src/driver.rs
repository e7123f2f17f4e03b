//! Document store driver abstraction.
//!
//! The provider treats the driver as an opaque dependency: collection-scoped
//! find / find-one-and-update / create / delete-one plus store-wide connect / close.
//! Implementations: `store-inmemory` (in-process) and `store-mongodb`.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{Collection, Document};
use crate::query::Filter;

/// Outcome of [`DocumentDriver::delete_one`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentDriver: Send + Sync {
    /// Opens the connection to the store.
    async fn connect(&self) -> Result<(), StorageError>;

    /// Closes the connection. Operations after close are the driver's business.
    async fn close(&self) -> Result<(), StorageError>;

    /// Returns every document in `collection` matching `filter`, in store order.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError>;

    /// Atomically sets the fields of `update` on one document matching `filter`.
    /// Returns the matched document, or `None` when nothing matched.
    async fn find_one_and_update(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Document,
    ) -> Result<Option<Document>, StorageError>;

    /// Inserts a new document and returns it as stored.
    async fn create(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StorageError>;

    /// Deletes at most one document matching `filter`.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError>;
}
