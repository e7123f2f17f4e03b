//! Storage crate: users and templates over a document store.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – User, Template, Collection, Entity
//! - [`query`] – Filter / Clause query builder
//! - [`response`] – StorageResponse envelope and its JSON form
//! - [`driver`] – DocumentDriver trait
//! - [`provider`] – StorageProvider trait and DocumentStorageProvider
//! - [`config`] – StorageConfig, ConnectionOptions

mod config;
mod driver;
mod error;
mod models;
mod provider;
mod query;
mod response;

#[cfg(test)]
mod provider_test;

pub use config::{ConnectionOptions, StorageConfig, DEFAULT_DATABASE};
pub use driver::{DeleteResult, DocumentDriver};
pub use error::StorageError;
pub use models::{from_document, to_document, Collection, Document, Entity, Template, User};
pub use provider::{DocumentStorageProvider, StorageProvider};
pub use query::{Clause, Filter};
pub use response::{JsonResponse, StorageResponse};
