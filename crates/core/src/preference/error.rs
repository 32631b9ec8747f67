use thiserror::Error;

use crate::storage::domain::key_value_store::StorageError;

#[derive(Error, Debug)]
pub enum PreferenceError {
    /// The persisted value is present but is not a JSON boolean.
    #[error("stored value for '{key}' is not a JSON boolean: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read '{key}' from storage: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: StorageError,
    },
    /// The in-memory value was already updated when this is returned.
    #[error("failed to write '{key}' to storage: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: StorageError,
    },
}
