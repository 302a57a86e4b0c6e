use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    Config(String),
    Io(#[from] std::io::Error),
    Filesystem(String),
    Serialization(String),
    Validation(String),
    NotFound(String),
}

impl Display for WsError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WsError::Config(s) => write!(f, "Configuration error: {}", s),
            WsError::Io(e) => write!(f, "I/O error: {}", e),
            WsError::Filesystem(s) => write!(f, "Filesystem error: {}", s),
            WsError::Serialization(s) => write!(f, "Serialization error: {}", s),
            WsError::Validation(s) => write!(f, "Validation error: {}", s),
            WsError::NotFound(s) => {
                write!(f, "Workspace not found: {}\n\n", s)?;
                write!(f, "Fix:\n")?;
                write!(f, "  • List known workspaces: ws list\n")?;
                write!(f, "  • Check the context: ws --context <name> list")
            }
        }
    }
}

impl From<serde_yaml_ng::Error> for WsError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        WsError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for WsError {
    fn from(err: serde_json::Error) -> Self {
        WsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
