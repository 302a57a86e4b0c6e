use std::fmt;
use ws_workspace::Workspace;

use crate::error::{Result, StoreError};

/// Natural key of a persisted workspace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkspaceKey {
    pub context: String,
    pub id: String,
}

impl WorkspaceKey {
    pub fn new(context: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            id: id.into(),
        }
    }

    pub fn of(workspace: &Workspace) -> Self {
        Self::new(workspace.context.clone(), workspace.id.clone())
    }
}

impl fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.id)
    }
}

/// Storage for workspace records keyed by `(context, id)`.
///
/// `update` is the only safe way to read-modify-write a record: implementations
/// hold their lock across the whole sequence.
pub trait WorkspaceStore: Send + Sync {
    fn load(&self, key: &WorkspaceKey) -> Result<Workspace>;

    /// Persist a record after validating it.
    ///
    /// Overwriting an existing record is held to the same rules as `update`:
    /// the id, context and creation timestamp cannot change.
    fn save(&self, workspace: &Workspace) -> Result<()>;

    fn delete(&self, key: &WorkspaceKey) -> Result<()>;

    /// Every workspace in a context, ordered by id.
    fn list(&self, context: &str) -> Result<Vec<Workspace>>;

    fn exists(&self, key: &WorkspaceKey) -> Result<bool>;

    /// Apply `change` to the stored record and persist the result.
    ///
    /// Fails without writing if `change` fails, alters the id, context or
    /// creation timestamp, or leaves the record invalid.
    fn update(
        &self,
        key: &WorkspaceKey,
        change: &mut dyn FnMut(&mut Workspace) -> Result<()>,
    ) -> Result<Workspace>;
}

/// Reject changes to the fields fixed at creation, then validate.
pub(crate) fn check_update(
    key: &WorkspaceKey,
    before: &Workspace,
    after: &Workspace,
) -> Result<()> {
    if after.id != before.id {
        return Err(StoreError::Immutable {
            key: key.clone(),
            field: "id",
        });
    }
    if after.context != before.context {
        return Err(StoreError::Immutable {
            key: key.clone(),
            field: "context",
        });
    }
    if after.creation_timestamp != before.creation_timestamp {
        return Err(StoreError::Immutable {
            key: key.clone(),
            field: "creationTimestamp",
        });
    }

    after.validate()?;
    Ok(())
}

/// Log validation warnings for a record about to be written.
pub(crate) fn log_warnings(workspace: &Workspace) {
    for warning in ws_workspace::validate_workspace(workspace).warnings {
        tracing::warn!(
            context = %workspace.context,
            workspace_id = %workspace.id,
            "{}",
            warning
        );
    }
}
