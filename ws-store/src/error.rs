use std::path::PathBuf;
use thiserror::Error;
use ws_core::WsError;
use ws_workspace::WorkspaceError;

use crate::store::WorkspaceKey;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during workspace store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Workspace {key} not found")]
    NotFound { key: WorkspaceKey },

    #[error("Invalid workspace file {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Workspace file {path} belongs to {found}, expected {key}")]
    KeyMismatch {
        path: PathBuf,
        key: WorkspaceKey,
        found: WorkspaceKey,
    },

    #[error("Cannot change {field} of workspace {key}")]
    Immutable {
        key: WorkspaceKey,
        field: &'static str,
    },

    #[error("Failed to acquire lock {path}: {reason}")]
    Lock { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Core(#[from] WsError),
}

impl From<StoreError> for WsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key } => WsError::NotFound(key.to_string()),
            StoreError::InvalidFormat { path, source } => WsError::Serialization(format!(
                "Invalid workspace file {}: {}",
                path.display(),
                source
            )),
            StoreError::Io(e) => WsError::Io(e),
            StoreError::Core(e) => e,
            StoreError::Workspace(e) => WsError::Validation(e.to_string()),
            other @ (StoreError::KeyMismatch { .. } | StoreError::Immutable { .. }) => {
                WsError::Validation(other.to_string())
            }
            other @ StoreError::Lock { .. } => WsError::Filesystem(other.to_string()),
        }
    }
}
