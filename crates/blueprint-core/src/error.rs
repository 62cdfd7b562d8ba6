//! Errors raised while loading or storing snapshots.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot JSON does not match the editor's export shape.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid snapshot name '{0}': must be a plain file name")]
    InvalidName(String),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
}
