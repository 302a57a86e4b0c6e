//! Workspace configuration record
//!
//! The durable description of a managed development workspace: what it is,
//! where its content comes from and which provider, server and IDE settings
//! apply to it. Every other component reads and writes this schema; it performs
//! no I/O of its own.

pub mod agent;
pub mod error;
pub mod ide;
pub mod models;
pub mod provider;
pub mod source;
pub mod validation;

pub use agent::AgentWorkspaceInfo;
pub use error::{Result, WorkspaceError};
pub use ide::Ide;
pub use models::{NewWorkspace, Workspace, WorkspaceIdeConfig, WorkspaceServerConfig};
pub use provider::{OptionValue, ProviderAgentConfig, WorkspaceProviderConfig};
pub use source::{SourceKind, WorkspaceSource};
pub use validation::{validate_workspace, ValidationError, ValidationResult};
