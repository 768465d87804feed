//! Error types for restoring and persisting store state.

use thiserror::Error;

/// Errors raised while restoring or persisting a store.
///
/// Nothing here is recovered locally: a malformed snapshot does not fall
/// back to the initial state and a rejected write is not retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage key was empty.
    #[error("storage key must not be empty")]
    EmptyKey,

    /// The stored snapshot is not valid JSON.
    #[error("malformed snapshot under '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot parsed, but the merged value does not fit the state type.
    #[error("snapshot under '{key}' does not match the state shape: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The state could not be turned into JSON.
    #[error("failed to serialize state for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend rejected a read or write (quota, disabled storage, I/O).
    #[error("storage {op} failed for '{key}': {message}")]
    Storage {
        op: &'static str,
        key: String,
        message: String,
    },

    /// No storage backend could be acquired.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn storage(op: &'static str, key: &str, message: impl ToString) -> Self {
        StoreError::Storage {
            op,
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
