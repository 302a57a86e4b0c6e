pub mod config;
pub mod error;
pub mod paths;

pub use config::{ContextConfig, GlobalConfig, DEFAULT_CONTEXT};
pub use error::{Result, WsError};
