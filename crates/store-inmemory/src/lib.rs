//! # In-Memory Document Store
//!
//! In-process implementation of the [`DocumentDriver`] trait from the `storage` crate.
//!
//! ## InMemoryDocumentStore
//!
//! Keeps each collection as an insertion-ordered `Vec` of documents and evaluates
//! [`Filter`]s itself, so contains-all and exact-match semantics are the ones defined by
//! the query builder.
//!
//! **Use for**: tests, local development, the CLI's dry runs.
//!
//! **Limitations**:
//! - Data is lost on restart
//! - Linear scans; no indexes beyond the optional unique keys
//!
//! ## Example
//!
//! ```rust
//! use store_inmemory::InMemoryDocumentStore;
//! use storage::{DocumentStorageProvider, StorageProvider, User};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = DocumentStorageProvider::new(InMemoryDocumentStore::new().with_unique_key("id"));
//!     provider.connect().await;
//!
//!     let user = User { id: Some("u1".to_string()), ..User::default() };
//!     assert!(provider.insert_user(&user).await.is_success());
//! }
//! ```
//!
//! ## Thread Safety
//!
//! Collections sit behind `Arc<RwLock<>>`; clones share the same data, so a test can keep
//! a handle while the provider owns another.

use async_trait::async_trait;
#[cfg(test)]
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storage::{Collection, DeleteResult, Document, DocumentDriver, Filter, StorageError};
use tokio::sync::RwLock;
use tracing::info;

/// In-memory document store for testing and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
    unique_keys: Vec<String>,
    connected: Arc<AtomicBool>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty, disconnected store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects inserts and updates that would give two documents of one collection the
    /// same value for `key`.
    pub fn with_unique_key(mut self, key: &str) -> Self {
        self.unique_keys.push(key.to_string());
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Returns the number of documents in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map(Vec::len).unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection).await == 0
    }

    /// Returns a copy of every document in `collection`, in insertion order.
    pub async fn documents(&self, collection: Collection) -> Vec<Document> {
        let collections = self.collections.read().await;
        collections.get(&collection).cloned().unwrap_or_default()
    }

    /// Clears all collections.
    pub async fn clear(&self) {
        let mut collections = self.collections.write().await;
        collections.clear();
    }

    fn ensure_connected(&self) -> Result<(), StorageError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(StorageError::NotConnected)
        }
    }

    /// Finds a unique key on which `candidate` collides with a document in `existing`,
    /// ignoring the document at `skip`.
    fn duplicate_key(
        &self,
        existing: &[Document],
        skip: Option<usize>,
        candidate: &Document,
    ) -> Option<String> {
        self.unique_keys.iter().find_map(|key| {
            let value = candidate.get(key).filter(|v| !v.is_null())?;
            let taken = existing
                .iter()
                .enumerate()
                .any(|(i, doc)| Some(i) != skip && doc.get(key) == Some(value));
            taken.then(|| format!("duplicate key {}: {}", key, value))
        })
    }
}

#[async_trait]
impl DocumentDriver for InMemoryDocumentStore {
    async fn connect(&self) -> Result<(), StorageError> {
        self.connected.store(true, Ordering::SeqCst);
        info!("In-memory document store connected");
        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.connected.store(false, Ordering::SeqCst);
        info!("In-memory document store closed");
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        self.ensure_connected()?;
        let collections = self.collections.read().await;
        let results: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        info!(
            %collection,
            clauses = filter.len(),
            count = results.len(),
            "In-memory document store find returned"
        );
        Ok(results)
    }

    async fn find_one_and_update(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Document,
    ) -> Result<Option<Document>, StorageError> {
        self.ensure_connected()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        let Some(index) = docs.iter().position(|d| filter.matches(d)) else {
            info!(%collection, "In-memory document store update matched nothing");
            return Ok(None);
        };

        let original = docs[index].clone();
        let mut updated = original.clone();
        for (field, value) in update {
            updated.insert(field, value);
        }
        if let Some(message) = self.duplicate_key(docs, Some(index), &updated) {
            return Err(StorageError::AlreadyExists(message));
        }
        docs[index] = updated;

        info!(%collection, index, "In-memory document store updated one document");
        Ok(Some(original))
    }

    async fn create(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StorageError> {
        self.ensure_connected()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some(message) = self.duplicate_key(docs, None, &document) {
            return Err(StorageError::AlreadyExists(message));
        }
        docs.push(document.clone());
        drop(collections);

        info!(
            %collection,
            id = ?document.get("id").and_then(serde_json::Value::as_str),
            "Document written to in-memory store"
        );
        Ok(document)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError> {
        self.ensure_connected()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::default());
        };

        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                info!(%collection, index, "In-memory document store deleted one document");
                Ok(DeleteResult { deleted_count: 1 })
            }
            None => Ok(DeleteResult::default()),
        }
    }
}
