//! Snapshot loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}
