//! Conversions between the storage crate's JSON documents / filters and BSON, plus
//! classification of driver errors.

use mongodb::bson::{self, Bson, Document as BsonDocument};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use storage::{Document, Filter, StorageError};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY: i32 = 11000;

/// Renders a filter as a BSON MongoDB query, using the query shape of
/// [`Filter::to_document`] (empty contains-all clauses are left out there).
pub fn filter_to_bson(filter: &Filter) -> Result<BsonDocument, StorageError> {
    bson::to_document(&filter.to_document())
        .map_err(|e| StorageError::Database(format!("invalid filter: {}", e)))
}

pub fn document_to_bson(document: &Document) -> Result<BsonDocument, StorageError> {
    bson::to_document(document)
        .map_err(|e| StorageError::Database(format!("invalid document: {}", e)))
}

/// Converts a stored BSON document to JSON using relaxed extended JSON
/// (`_id` becomes `{"$oid": ..}`).
pub fn bson_to_document(document: BsonDocument) -> Document {
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// Maps a driver error; duplicate-key violations become `AlreadyExists`.
pub fn map_error(err: MongoError) -> StorageError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    };
    if duplicate {
        StorageError::AlreadyExists(err.to_string())
    } else {
        StorageError::Database(err.to_string())
    }
}
