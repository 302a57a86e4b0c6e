use anyhow::{Context, Result};
use std::path::PathBuf;
use ws_core::{paths, ContextConfig, GlobalConfig};
use ws_store::{FileWorkspaceStore, WorkspaceKey, WorkspaceStore};
use ws_workspace::Workspace;

use crate::cli::{Args, Command};

mod inspect;
mod modify;

/// What every command needs: the store to work against, the active context
/// and that context's configured defaults.
pub struct CommandContext<'a> {
    pub store: &'a dyn WorkspaceStore,
    pub context: String,
    pub defaults: ContextConfig,
}

impl CommandContext<'_> {
    pub fn key(&self, id: &str) -> WorkspaceKey {
        WorkspaceKey::new(self.context.clone(), id)
    }

    /// Load a workspace of the active context, with user-facing hints on failure.
    pub fn load(&self, id: &str) -> ws_core::Result<Workspace> {
        Ok(self.store.load(&self.key(id))?)
    }
}

pub fn execute_command(args: Args) -> Result<()> {
    let state_dir: PathBuf = match args.home {
        Some(home) => home,
        None => paths::state_dir()?,
    };

    let config_path = paths::global_config_path(&state_dir);
    let config = GlobalConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let context = config.resolve_context(args.context.as_deref());
    let defaults = config.context(&context).cloned().unwrap_or_default();

    let store = FileWorkspaceStore::with_state_dir(&state_dir);
    let ctx = CommandContext {
        store: &store,
        context,
        defaults,
    };

    match args.command {
        Command::List => inspect::list(&ctx),
        Command::Show { id, json } => inspect::show(&ctx, &id, json),
        Command::Source { id } => inspect::source(&ctx, &id),
        Command::Validate { id } => inspect::validate(&ctx, &id),
        Command::AgentInfo { id, remote_folder } => {
            inspect::agent_info(&ctx, &id, remote_folder)
        }
        Command::SetIde { id, ide, options } => modify::set_ide(&ctx, &id, &ide, options),
        Command::Delete { id } => modify::delete(&ctx, &id),
    }
}
