// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ws")]
#[command(about = "Inspect and manage development workspace records")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Context to operate in (defaults to $WS_CONTEXT, then the configured default)
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// State directory (defaults to $WS_HOME, then ~/.ws)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List workspaces in the context
    List,
    /// Show a workspace record
    Show {
        /// Workspace id
        id: String,
        /// Print the stored JSON form
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical source of a workspace
    Source {
        /// Workspace id
        id: String,
    },
    /// Check a workspace record for errors and warnings
    Validate {
        /// Workspace id
        id: String,
    },
    /// Print the encoded agent payload for a workspace
    AgentInfo {
        /// Workspace id
        id: String,
        /// Workspace folder on the remote machine
        #[arg(long)]
        remote_folder: PathBuf,
    },
    /// Change the IDE of a workspace
    SetIde {
        /// Workspace id
        id: String,
        /// IDE name (none, vscode, openvscode, goland)
        ide: String,
        /// IDE option as KEY=VALUE, may be repeated
        #[arg(long = "option", value_parser = parse_key_val)]
        options: Vec<(String, String)>,
    },
    /// Delete a workspace record and its directory
    Delete {
        /// Workspace id
        id: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' in '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
