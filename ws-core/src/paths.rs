//! User state directory layout for the workspace tool.
//!
//! Everything the tool persists lives below a single state directory:
//!
//! ```text
//! <state>/config.yaml
//! <state>/contexts/<context>/workspaces/<id>/workspace.json
//! <state>/contexts/<context>/locks/<id>.lock
//! ```
//!
//! Lock files live outside the workspace directory so removing a workspace
//! never unlinks a lock another process may be waiting on.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, WsError};

/// Environment variable overriding the state directory.
pub const HOME_ENV: &str = "WS_HOME";

/// File name of a persisted workspace record.
pub const WORKSPACE_CONFIG_FILE: &str = "workspace.json";

/// Get the tool's state directory.
///
/// Returns `$WS_HOME` when set and non-empty, otherwise `~/.ws`.
#[must_use = "state directory path should be used"]
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".ws"))
        .ok_or_else(|| WsError::Config("Could not determine home directory".into()))
}

/// Get the global configuration path (`<state>/config.yaml`).
pub fn global_config_path(state_dir: &Path) -> PathBuf {
    state_dir.join("config.yaml")
}

/// Directory holding every workspace of one context.
pub fn context_workspaces_dir(state_dir: &Path, context: &str) -> PathBuf {
    state_dir.join("contexts").join(context).join("workspaces")
}

/// Directory owned by a single workspace.
pub fn workspace_dir(state_dir: &Path, context: &str, id: &str) -> PathBuf {
    context_workspaces_dir(state_dir, context).join(id)
}

/// Path of a workspace's persisted record.
pub fn workspace_config_path(state_dir: &Path, context: &str, id: &str) -> PathBuf {
    workspace_dir(state_dir, context, id).join(WORKSPACE_CONFIG_FILE)
}

/// Path of the lock file guarding a workspace's record.
pub fn workspace_lock_path(state_dir: &Path, context: &str, id: &str) -> PathBuf {
    state_dir
        .join("contexts")
        .join(context)
        .join("locks")
        .join(format!("{}.lock", id))
}

/// Check that a context name or workspace id is safe to use as a single path component.
pub fn validate_path_component(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WsError::Validation(format!("{} cannot be empty", kind)));
    }

    if value == "." || value == ".." || value.contains(['/', '\\']) || value.contains('\0') {
        return Err(WsError::Validation(format!(
            "{} '{}' must be a single path component",
            kind, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_layout() {
        let state = Path::new("/home/user/.ws");
        assert_eq!(
            workspace_config_path(state, "default", "demo"),
            PathBuf::from("/home/user/.ws/contexts/default/workspaces/demo/workspace.json")
        );
        assert_eq!(
            workspace_lock_path(state, "default", "demo"),
            PathBuf::from("/home/user/.ws/contexts/default/locks/demo.lock")
        );
        assert_eq!(
            global_config_path(state),
            PathBuf::from("/home/user/.ws/config.yaml")
        );
    }

    #[test]
    fn test_validate_path_component() {
        assert!(validate_path_component("id", "my-workspace").is_ok());
        assert!(validate_path_component("id", "ws_01.dev").is_ok());

        assert!(validate_path_component("id", "").is_err());
        assert!(validate_path_component("id", "   ").is_err());
        assert!(validate_path_component("id", "..").is_err());
        assert!(validate_path_component("id", "a/b").is_err());
        assert!(validate_path_component("context", "a\\b").is_err());
    }
}
