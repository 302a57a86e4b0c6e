use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use ws_workspace::Workspace;

use crate::error::{Result, StoreError};
use crate::store::{check_update, log_warnings, WorkspaceKey, WorkspaceStore};

/// In-memory workspace store.
#[derive(Debug, Default)]
pub struct MemoryWorkspaceStore {
    workspaces: Mutex<BTreeMap<WorkspaceKey, Workspace>>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<WorkspaceKey, Workspace>>> {
        self.workspaces.lock().map_err(|e| StoreError::Lock {
            path: "memory".into(),
            reason: e.to_string(),
        })
    }
}

impl WorkspaceStore for MemoryWorkspaceStore {
    fn load(&self, key: &WorkspaceKey) -> Result<Workspace> {
        self.entries()?
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })
    }

    fn save(&self, workspace: &Workspace) -> Result<()> {
        workspace.validate()?;

        let key = WorkspaceKey::of(workspace);
        let mut entries = self.entries()?;
        if let Some(existing) = entries.get(&key) {
            check_update(&key, existing, workspace)?;
        }
        log_warnings(workspace);

        let mut stored = workspace.clone();
        stored.origin = None;
        entries.insert(key, stored);
        Ok(())
    }

    fn delete(&self, key: &WorkspaceKey) -> Result<()> {
        self.entries()?
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })
    }

    fn list(&self, context: &str) -> Result<Vec<Workspace>> {
        Ok(self
            .entries()?
            .iter()
            .filter(|(key, _)| key.context == context)
            .map(|(_, workspace)| workspace.clone())
            .collect())
    }

    fn exists(&self, key: &WorkspaceKey) -> Result<bool> {
        Ok(self.entries()?.contains_key(key))
    }

    fn update(
        &self,
        key: &WorkspaceKey,
        change: &mut dyn FnMut(&mut Workspace) -> Result<()>,
    ) -> Result<Workspace> {
        let mut entries = self.entries()?;
        let before = entries
            .get(key)
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })?;

        let mut after = before.clone();
        change(&mut after)?;
        check_update(key, before, &after)?;
        log_warnings(&after);

        entries.insert(key.clone(), after.clone());
        Ok(after)
    }
}
