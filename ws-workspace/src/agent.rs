use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::models::Workspace;

/// Workspace description handed to a remote agent.
///
/// `folder` is where the workspace lives on the agent's machine. The sender
/// computes it for every transfer and it is never part of the wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentWorkspaceInfo {
    pub workspace: Workspace,

    #[serde(skip)]
    pub folder: PathBuf,
}

impl AgentWorkspaceInfo {
    pub fn new(workspace: Workspace, folder: impl Into<PathBuf>) -> Self {
        Self {
            workspace,
            folder: folder.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the wire form and attach the receiver's folder.
    pub fn from_json(json: &str, folder: impl Into<PathBuf>) -> Result<Self> {
        let mut info: Self = serde_json::from_str(json)?;
        info.folder = folder.into();
        Ok(info)
    }

    /// Encode as a single shell-safe argument (standard base64 of the JSON form).
    pub fn encode(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    pub fn decode(encoded: &str, folder: impl Into<PathBuf>) -> Result<Self> {
        let bytes = STANDARD.decode(encoded.trim())?;
        let info: Self = serde_json::from_slice(&bytes)?;
        Ok(Self {
            folder: folder.into(),
            ..info
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkspaceError;
    use crate::source::WorkspaceSource;

    fn workspace() -> Workspace {
        Workspace {
            id: "demo".into(),
            context: "default".into(),
            folder: PathBuf::from("/home/u/.ws/contexts/default/workspaces/demo"),
            source: WorkspaceSource::image("ubuntu:22.04"),
            ..Default::default()
        }
    }

    #[test]
    fn test_folder_is_not_serialised() {
        let info = AgentWorkspaceInfo::new(workspace(), "/remote/workspaces/demo");
        let json = info.to_json().unwrap();

        assert!(!json.contains("/remote/workspaces/demo"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["workspace"]["id"], "demo");
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_receiver_supplies_folder() {
        let info = AgentWorkspaceInfo::new(workspace(), "/sender/side");
        let json = info.to_json().unwrap();

        let received = AgentWorkspaceInfo::from_json(&json, "/receiver/side").unwrap();
        assert_eq!(received.workspace, info.workspace);
        assert_eq!(received.folder, PathBuf::from("/receiver/side"));
    }

    #[test]
    fn test_encode_decode() {
        let info = workspace().agent_info("/remote/demo");
        let encoded = info.encode().unwrap();
        assert!(!encoded.contains(' '));

        let decoded = AgentWorkspaceInfo::decode(&encoded, "/remote/demo").unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = AgentWorkspaceInfo::decode("not base64!", "/x").unwrap_err();
        assert!(matches!(err, WorkspaceError::Transport(_)));

        let err = AgentWorkspaceInfo::decode(&STANDARD.encode("[1,2]"), "/x").unwrap_err();
        assert!(matches!(err, WorkspaceError::Serialization(_)));
    }
}
