//! File-backed workspace store.
//!
//! Each workspace is a JSON document at
//! `<state>/contexts/<context>/workspaces/<id>/workspace.json`. Writes go to a
//! temporary file in the same directory and are moved into place. Every
//! mutation holds an exclusive lock on `<state>/contexts/<context>/locks/<id>.lock`,
//! which is never removed.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use ws_core::paths;
use ws_workspace::Workspace;

use crate::error::{Result, StoreError};
use crate::store::{check_update, log_warnings, WorkspaceKey, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct FileWorkspaceStore {
    state_dir: PathBuf,
}

impl FileWorkspaceStore {
    /// Creates a store rooted at the default state directory (`$WS_HOME` or `~/.ws`).
    pub fn new() -> ws_core::Result<Self> {
        Ok(Self::with_state_dir(paths::state_dir()?))
    }

    pub fn with_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn check_key(key: &WorkspaceKey) -> Result<()> {
        paths::validate_path_component("Context", &key.context)?;
        paths::validate_path_component("Workspace id", &key.id)?;
        Ok(())
    }

    /// Directory owned by a workspace; the default `folder` for new workspaces.
    pub fn workspace_dir(&self, key: &WorkspaceKey) -> Result<PathBuf> {
        Self::check_key(key)?;
        Ok(paths::workspace_dir(&self.state_dir, &key.context, &key.id))
    }

    pub fn config_path(&self, key: &WorkspaceKey) -> Result<PathBuf> {
        Self::check_key(key)?;
        Ok(paths::workspace_config_path(
            &self.state_dir,
            &key.context,
            &key.id,
        ))
    }

    /// Lock file serialising writers of one workspace.
    pub fn lock_path(&self, key: &WorkspaceKey) -> Result<PathBuf> {
        Self::check_key(key)?;
        Ok(paths::workspace_lock_path(
            &self.state_dir,
            &key.context,
            &key.id,
        ))
    }

    fn acquire_lock(&self, key: &WorkspaceKey) -> Result<File> {
        let lock_path = self.lock_path(key)?;
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file
            .lock_exclusive()
            .map_err(|e| StoreError::Lock {
                path: lock_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(lock_file)
    }

    /// Read a record without locking. Fills in an empty id or context from the key.
    fn read(&self, key: &WorkspaceKey, path: &Path) -> Result<Workspace> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound { key: key.clone() })
            }
            Err(e) => return Err(e.into()),
        };

        let mut workspace: Workspace =
            serde_json::from_str(&content).map_err(|source| StoreError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        if workspace.id.is_empty() {
            workspace.id = key.id.clone();
        }
        if workspace.context.is_empty() {
            workspace.context = key.context.clone();
        }

        let found = WorkspaceKey::of(&workspace);
        if &found != key {
            return Err(StoreError::KeyMismatch {
                path: path.to_path_buf(),
                key: key.clone(),
                found,
            });
        }

        Ok(workspace.with_origin(path))
    }

    /// Write a record atomically. The caller holds the lock.
    fn write(&self, key: &WorkspaceKey, workspace: &Workspace) -> Result<()> {
        let dir = self.workspace_dir(key)?;
        let path = self.config_path(key)?;
        let json = workspace.to_json_pretty()?;

        fs::create_dir_all(&dir)?;

        let temp_file = tempfile::Builder::new()
            .prefix("workspace-")
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        temp_file.as_file().write_all(json.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&path).map_err(|e| e.error)?;

        debug!(
            context = %key.context,
            workspace_id = %key.id,
            path = %path.display(),
            "saved workspace"
        );
        Ok(())
    }
}

impl WorkspaceStore for FileWorkspaceStore {
    fn load(&self, key: &WorkspaceKey) -> Result<Workspace> {
        let path = self.config_path(key)?;
        let workspace = self.read(key, &path)?;
        debug!(
            context = %key.context,
            workspace_id = %key.id,
            source = %workspace.source,
            "loaded workspace"
        );
        Ok(workspace)
    }

    fn save(&self, workspace: &Workspace) -> Result<()> {
        workspace.validate()?;

        let key = WorkspaceKey::of(workspace);
        let path = self.config_path(&key)?;
        let _lock = self.acquire_lock(&key)?;

        match self.read(&key, &path) {
            Ok(existing) => check_update(&key, &existing, workspace)?,
            Err(StoreError::NotFound { .. }) => {}
            Err(e @ StoreError::InvalidFormat { .. }) => {
                warn!(workspace = %key, error = %e, "replacing unreadable workspace record");
            }
            Err(e) => return Err(e),
        }

        log_warnings(workspace);
        self.write(&key, workspace)
    }

    fn delete(&self, key: &WorkspaceKey) -> Result<()> {
        let path = self.config_path(key)?;
        let dir = self.workspace_dir(key)?;
        let _lock = self.acquire_lock(key)?;

        if !path.is_file() {
            return Err(StoreError::NotFound { key: key.clone() });
        }

        fs::remove_file(&path)?;
        if let Err(e) = fs::remove_dir_all(&dir) {
            warn!(path = %dir.display(), error = %e, "failed to remove workspace directory");
        }

        info!(context = %key.context, workspace_id = %key.id, "deleted workspace");
        Ok(())
    }

    fn list(&self, context: &str) -> Result<Vec<Workspace>> {
        paths::validate_path_component("Context", context)?;
        let dir = paths::context_workspaces_dir(&self.state_dir, context);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut workspaces = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let key = WorkspaceKey::new(context, id);
            let path = entry.path().join(paths::WORKSPACE_CONFIG_FILE);
            if !path.exists() {
                continue;
            }

            match self.read(&key, &path) {
                Ok(workspace) => workspaces.push(workspace),
                Err(e) => warn!(workspace = %key, error = %e, "skipping unreadable workspace"),
            }
        }

        workspaces.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(workspaces)
    }

    fn exists(&self, key: &WorkspaceKey) -> Result<bool> {
        Ok(self.config_path(key)?.is_file())
    }

    fn update(
        &self,
        key: &WorkspaceKey,
        change: &mut dyn FnMut(&mut Workspace) -> Result<()>,
    ) -> Result<Workspace> {
        let path = self.config_path(key)?;
        let _lock = self.acquire_lock(key)?;
        let before = self.read(key, &path)?;

        let mut after = before.clone();
        change(&mut after)?;
        check_update(key, &before, &after)?;
        log_warnings(&after);

        self.write(key, &after)?;
        Ok(after.with_origin(path))
    }
}
