use std::path::PathBuf;

use thiserror::Error;

use crate::models::Horizon;

/// Errors that can occur during store operations.
///
/// Validation errors surface before any mutation. A `Persistence` error
/// means the in-memory mutation was applied but the write to disk failed;
/// callers should report it without discarding the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plan title must not be empty")]
    EmptyTitle,

    #[error("activity name must not be empty")]
    EmptyActivityName,

    #[error("no plan {id:?} in the {horizon} bucket")]
    PlanNotFound { horizon: Horizon, id: String },

    #[error("plan {id:?} has no sub-task at index {index}")]
    SubtaskNotFound { id: String, index: usize },

    #[error("failed to write {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether this error left the in-memory state updated but unsaved.
    ///
    /// Such errors are non-fatal: the session continues on the in-memory
    /// model and the failure is reported as a warning.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Encode { .. })
    }
}
