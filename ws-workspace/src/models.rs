use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::agent::AgentWorkspaceInfo;
use crate::error::{Result, WorkspaceError};
use crate::ide::Ide;
use crate::provider::{OptionValue, ProviderAgentConfig, WorkspaceProviderConfig};
use crate::source::WorkspaceSource;
use crate::validation::validate_workspace;

/// Remote machine backing a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceServerConfig {
    /// Server id, empty when the workspace has no dedicated server
    #[serde(rename = "serverId", skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Destroy the server together with the workspace
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_delete: bool,
}

impl WorkspaceServerConfig {
    pub fn new(id: impl Into<String>, auto_delete: bool) -> Self {
        Self {
            id: id.into(),
            auto_delete,
        }
    }

    pub fn has_server(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether tearing down the workspace must also destroy the server.
    ///
    /// `auto_delete` has no effect without a server id.
    pub fn should_auto_delete(&self) -> bool {
        self.auto_delete && self.has_server()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && !self.auto_delete
    }
}

/// IDE settings of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceIdeConfig {
    /// IDE to open, `None` (or an empty string on the wire) means the caller's default
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_ide"
    )]
    pub ide: Option<Ide>,

    /// IDE specific options
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

fn deserialize_ide<'de, D>(deserializer: D) -> std::result::Result<Option<Ide>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|name| !name.is_empty()).map(Ide::from))
}

impl WorkspaceIdeConfig {
    /// Option asking VS Code to open in the browser instead of the desktop app.
    pub const BROWSER_OPTION: &'static str = "BROWSER";

    pub fn new(ide: Ide) -> Self {
        Self {
            ide: Some(ide),
            options: BTreeMap::new(),
        }
    }

    /// Whether VS Code should be opened in the browser. Only meaningful for [`Ide::VsCode`].
    pub fn browser(&self) -> bool {
        self.ide == Some(Ide::VsCode)
            && self
                .options
                .get(Self::BROWSER_OPTION)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    pub fn is_empty(&self) -> bool {
        self.ide.is_none() && self.options.is_empty()
    }
}

/// A managed development workspace.
///
/// Identified by `(context, id)`. `origin` records the file this value was
/// loaded from; it is never serialised and is ignored by equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workspace {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Local folder holding the workspace's artifacts
    #[serde(skip_serializing_if = "path_is_empty")]
    pub folder: PathBuf,

    #[serde(skip_serializing_if = "WorkspaceProviderConfig::is_empty")]
    pub provider: WorkspaceProviderConfig,

    #[serde(skip_serializing_if = "WorkspaceServerConfig::is_empty")]
    pub server: WorkspaceServerConfig,

    #[serde(skip_serializing_if = "WorkspaceIdeConfig::is_empty")]
    pub ide: WorkspaceIdeConfig,

    #[serde(skip_serializing_if = "WorkspaceSource::is_unset")]
    pub source: WorkspaceSource,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

fn path_is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.folder == other.folder
            && self.provider == other.provider
            && self.server == other.server
            && self.ide == other.ide
            && self.source == other.source
            && self.creation_timestamp == other.creation_timestamp
            && self.context == other.context
    }
}

/// Inputs for creating a workspace.
#[derive(Debug, Clone, Default)]
pub struct NewWorkspace {
    pub id: String,
    pub context: String,
    pub folder: PathBuf,
    pub source: WorkspaceSource,
    pub provider_name: String,
    pub provider_options: BTreeMap<String, OptionValue>,
    pub provider_agent: ProviderAgentConfig,
    pub server: WorkspaceServerConfig,
    pub ide: WorkspaceIdeConfig,
}

impl Workspace {
    /// Create a workspace stamped with the current time.
    ///
    /// Fails with [`WorkspaceError::Invalid`] listing every problem when the
    /// id or context is empty, the source is empty or ambiguous, the IDE is
    /// unknown, or options are given without a provider.
    pub fn create(new: NewWorkspace) -> Result<Self> {
        let workspace = Self {
            id: new.id,
            folder: new.folder,
            provider: WorkspaceProviderConfig {
                name: new.provider_name,
                options: new.provider_options,
                agent: new.provider_agent,
            },
            server: new.server,
            ide: new.ide,
            source: new.source,
            creation_timestamp: Some(Utc::now()),
            context: new.context,
            origin: None,
        };

        workspace.validate()?;
        debug!(
            context = %workspace.context,
            workspace_id = %workspace.id,
            source = %workspace.source,
            "created workspace"
        );
        Ok(workspace)
    }

    /// Check the record, reporting every validation error on failure.
    pub fn validate(&self) -> Result<()> {
        let result = validate_workspace(self);
        if result.is_valid() {
            Ok(())
        } else {
            Err(WorkspaceError::Invalid {
                errors: result.errors,
            })
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Record where this value was loaded from.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Snapshot this workspace for a remote agent working in `remote_folder`.
    pub fn agent_info(&self, remote_folder: impl Into<PathBuf>) -> AgentWorkspaceInfo {
        AgentWorkspaceInfo::new(self.clone(), remote_folder)
    }

    /// Effective IDE name for display, `-` when unset.
    pub fn ide_name(&self) -> &str {
        self.ide.ide.as_ref().map_or("-", Ide::as_str)
    }
}
