//! # MongoDB Document Store
//!
//! [`MongoDocumentStore`] implements the storage crate's `DocumentDriver` over the
//! official `mongodb` driver.
//!
//! - Filters are rendered to the MongoDB query language (contains-all → `$all`)
//! - Updates are applied with `$set` through `findOneAndUpdate`
//! - `connect` pings the server; `close` drops the client
//! - Unique index violations (code 11000) surface as `StorageError::AlreadyExists`
//!
//! ## Example
//!
//! ```rust,no_run
//! use store_mongodb::MongoDocumentStore;
//! use storage::{DocumentStorageProvider, StorageConfig, StorageProvider, User};
//!
//! # async fn example() {
//! let config = StorageConfig::with_uri("mongodb://localhost:27017");
//! let provider = DocumentStorageProvider::new(MongoDocumentStore::from_config(&config));
//! provider.connect().await;
//! let users = provider.get_users(&User::default()).await;
//! # }
//! ```

mod convert;
mod store;

pub use convert::{bson_to_document, document_to_bson, filter_to_bson, map_error, DUPLICATE_KEY};
pub use store::{apply_connection_options, MongoDocumentStore};
