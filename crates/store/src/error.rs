//! Store error types.

use thiserror::Error;

/// Errors surfaced by snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure while reading or writing a snapshot file.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized or parsed.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
