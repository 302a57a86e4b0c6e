use thiserror::Error;

use crate::validation::ValidationError;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Invalid workspace: {}", join_errors(.errors))]
    Invalid { errors: Vec<ValidationError> },

    #[error("Unknown IDE '{0}'. Must be one of: none, vscode, openvscode, goland")]
    UnknownIde(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid agent transport payload: {0}")]
    Transport(#[from] base64::DecodeError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl WorkspaceError {
    /// Validation issues carried by this error, empty for non-validation errors.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            WorkspaceError::Invalid { errors } => errors.as_slice(),
            _ => &[],
        }
    }
}
