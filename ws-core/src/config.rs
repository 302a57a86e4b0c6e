//! Global tool configuration (`<state>/config.yaml`).

use serde::{Deserialize, Serialize};
use serde_yaml_ng as serde_yaml;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, WsError};

/// Context used when neither the command line, the environment nor the config names one.
pub const DEFAULT_CONTEXT: &str = "default";

/// Environment variable selecting the active context.
pub const CONTEXT_ENV: &str = "WS_CONTEXT";

/// Per-context defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    /// Provider used for new workspaces in this context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    /// IDE used for new workspaces in this context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ide: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    #[serde(default = "default_context_name")]
    pub default_context: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contexts: BTreeMap<String, ContextConfig>,
}

fn default_context_name() -> String {
    DEFAULT_CONTEXT.to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_context: default_context_name(),
            contexts: BTreeMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load the global config, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no global config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            WsError::Config(format!(
                "Failed to parse global config {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WsError::Filesystem(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Resolve the active context: explicit choice, then `$WS_CONTEXT`, then `defaultContext`.
    pub fn resolve_context(&self, explicit: Option<&str>) -> String {
        let from_env = env::var(CONTEXT_ENV).ok();
        self.resolve_context_with(explicit, from_env.as_deref())
    }

    fn resolve_context_with(&self, explicit: Option<&str>, from_env: Option<&str>) -> String {
        explicit
            .or(from_env)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_context.clone())
    }

    pub fn context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }
}
