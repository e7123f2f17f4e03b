//! Entity models and the document shape shared with drivers.
//!
//! - [`User`], [`Template`] – entities, used both as records and as partial filters
//! - [`Collection`] – logical collection an entity lives in
//! - [`Entity`] – ties an entity type to its collection and filter construction

mod template;
mod user;

pub use template::Template;
pub use user::User;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::query::Filter;

/// A stored document: a JSON object keyed by wire field name.
pub type Document = Map<String, Value>;

/// Logical collections managed by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Templates,
}

impl Collection {
    /// Collection name as used by the document store.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Templates => "templates",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An entity stored in one collection. Every field is optional, so a value doubles as a
/// partial filter or a partial update payload.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Builds the store filter for this value used as a partial match. Array fields become
    /// contains-all clauses, everything else is exact-match; absent fields are unconstrained.
    fn to_filter(&self) -> Filter;
}

/// Serializes an entity (or any serde value) into a document. Absent fields are omitted.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StorageError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::Database(format!(
            "expected a document, got {}",
            other
        ))),
    }
}

/// Deserializes a stored document into an entity. Unknown fields (e.g. `_id`) are ignored.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StorageError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
