//! Result envelope returned by every provider operation.
//!
//! [`StorageResponse`] replaces error propagation at the provider boundary: callers branch
//! on `Success` / `Failure`. [`JsonResponse`] is its wire form
//! (`{"success": .., "result": .., "errorMessage": ..}`).

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Outcome of a storage operation.
///
/// A find-type operation that matches nothing is a `Failure` with a "not found" message,
/// not an empty `Success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageResponse<T> {
    /// Operation succeeded, with an optional payload.
    Success(Option<T>),
    /// Operation failed; human-readable message.
    Failure(String),
}

impl<T> StorageResponse<T> {
    pub fn success(value: T) -> Self {
        StorageResponse::Success(Some(value))
    }

    /// Success without payload (updates, removals).
    pub fn done() -> Self {
        StorageResponse::Success(None)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        StorageResponse::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StorageResponse::Success(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            StorageResponse::Success(value) => value.as_ref(),
            StorageResponse::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            StorageResponse::Success(_) => None,
            StorageResponse::Failure(message) => Some(message),
        }
    }

    /// Converts into a plain `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self {
            StorageResponse::Success(value) => Ok(value),
            StorageResponse::Failure(message) => Err(message),
        }
    }
}

impl<T> From<StorageError> for StorageResponse<T> {
    fn from(err: StorageError) -> Self {
        StorageResponse::Failure(err.to_string())
    }
}

/// Wire representation of [`StorageResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> From<StorageResponse<T>> for JsonResponse<T> {
    fn from(response: StorageResponse<T>) -> Self {
        match response {
            StorageResponse::Success(result) => Self {
                success: true,
                result,
                error_message: None,
            },
            StorageResponse::Failure(message) => Self {
                success: false,
                result: None,
                error_message: Some(message),
            },
        }
    }
}

impl<T> From<JsonResponse<T>> for StorageResponse<T> {
    fn from(response: JsonResponse<T>) -> Self {
        if response.success {
            StorageResponse::Success(response.result)
        } else {
            StorageResponse::Failure(response.error_message.unwrap_or_default())
        }
    }
}
