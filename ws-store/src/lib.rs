//! Workspace record persistence.
//!
//! Collaborators receive a [`WorkspaceStore`] instead of reaching for shared
//! global state. [`FileWorkspaceStore`] keeps one JSON file per workspace below
//! the state directory; [`MemoryWorkspaceStore`] backs tests and embedders.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use file::FileWorkspaceStore;
pub use memory::MemoryWorkspaceStore;
pub use store::{WorkspaceKey, WorkspaceStore};
