use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WorkspaceError;

/// Editor integration used to open a workspace.
///
/// The wire form is the lowercase name. Names outside the known set are kept in
/// [`Ide::Unrecognized`] on read so a record written by a newer tool still loads;
/// validation rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ide {
    None,
    VsCode,
    OpenVsCode,
    Goland,
    Unrecognized(String),
}

impl Ide {
    /// Every IDE the tool knows how to launch.
    pub const KNOWN: [Ide; 4] = [Ide::None, Ide::VsCode, Ide::OpenVsCode, Ide::Goland];

    pub fn as_str(&self) -> &str {
        match self {
            Ide::None => "none",
            Ide::VsCode => "vscode",
            Ide::OpenVsCode => "openvscode",
            Ide::Goland => "goland",
            Ide::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Ide::Unrecognized(_))
    }

    fn from_known(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Ide::None),
            "vscode" => Some(Ide::VsCode),
            "openvscode" => Some(Ide::OpenVsCode),
            "goland" => Some(Ide::Goland),
            _ => None,
        }
    }
}

impl fmt::Display for Ide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input: unknown names are an error.
impl FromStr for Ide {
    type Err = WorkspaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Ide::from_known(&name).ok_or_else(|| WorkspaceError::UnknownIde(s.to_string()))
    }
}

impl From<String> for Ide {
    fn from(value: String) -> Self {
        Ide::from_known(&value).unwrap_or(Ide::Unrecognized(value))
    }
}

impl From<Ide> for String {
    fn from(value: Ide) -> Self {
        match value {
            Ide::Unrecognized(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
