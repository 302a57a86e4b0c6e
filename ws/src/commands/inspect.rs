use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;
use ws_workspace::{validate_workspace, Workspace};

use super::CommandContext;

pub fn list(ctx: &CommandContext) -> Result<()> {
    let workspaces = ctx.store.list(&ctx.context)?;

    if workspaces.is_empty() {
        println!("No workspaces in context '{}'", ctx.context);
        return Ok(());
    }

    let id_width = workspaces
        .iter()
        .map(|w| w.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    println!(
        "{:<id_width$}  {:<10}  {:<10}  SOURCE",
        "ID", "PROVIDER", "IDE"
    );
    for workspace in &workspaces {
        println!(
            "{:<id_width$}  {:<10}  {:<10}  {}",
            workspace.id,
            provider_label(ctx, workspace),
            ide_label(ctx, workspace),
            workspace.source
        );
    }

    Ok(())
}

pub fn show(ctx: &CommandContext, id: &str, json: bool) -> Result<()> {
    let workspace = ctx.load(id)?;

    if json {
        println!("{}", workspace.to_json_pretty()?);
        return Ok(());
    }

    print_summary(ctx, &workspace);
    Ok(())
}

/// Provider name, falling back to the context's default provider.
fn provider_label(ctx: &CommandContext, workspace: &Workspace) -> String {
    match (&*workspace.provider.name, &ctx.defaults.default_provider) {
        ("", Some(default)) => format!("{} (default)", default),
        ("", None) => "-".to_string(),
        (name, _) => name.to_string(),
    }
}

/// IDE name, falling back to the context's default IDE.
fn ide_label(ctx: &CommandContext, workspace: &Workspace) -> String {
    match (&workspace.ide.ide, &ctx.defaults.default_ide) {
        (None, Some(default)) => format!("{} (default)", default),
        _ => workspace.ide_name().to_string(),
    }
}

fn print_summary(ctx: &CommandContext, workspace: &Workspace) {
    println!("{}", workspace.id.bold());
    println!("  Context:   {}", workspace.context);
    println!("  Source:    {}", workspace.source);
    if !workspace.folder.as_os_str().is_empty() {
        println!("  Folder:    {}", workspace.folder.display());
    }
    println!("  Provider:  {}", provider_label(ctx, workspace));
    for (key, option) in &workspace.provider.options {
        println!("    {} = {}", key, option.value);
    }
    if workspace.server.has_server() {
        let cleanup = if workspace.server.should_auto_delete() {
            " (deleted with workspace)"
        } else {
            ""
        };
        println!("  Server:    {}{}", workspace.server.id, cleanup);
    }
    println!("  IDE:       {}", ide_label(ctx, workspace));
    if workspace.ide.browser() {
        println!("    opens in the browser");
    }
    for (key, value) in &workspace.ide.options {
        println!("    {} = {}", key, value);
    }
    if let Some(created) = workspace.creation_timestamp {
        println!("  Created:   {}", created.to_rfc3339());
    }
    if let Some(origin) = &workspace.origin {
        println!("  Loaded from {}", origin.display().to_string().dimmed());
    }
}

pub fn source(ctx: &CommandContext, id: &str) -> Result<()> {
    let workspace = ctx.load(id)?;
    println!("{}", workspace.source);
    Ok(())
}

pub fn validate(ctx: &CommandContext, id: &str) -> Result<()> {
    let workspace = ctx.load(id)?;
    let result = validate_workspace(&workspace);

    for warning in &result.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    for error in &result.errors {
        println!("{} {}", "error:".red().bold(), error);
        if let Some(suggestion) = &error.fix_suggestion {
            println!("  {} {}", "hint:".cyan(), suggestion);
        }
    }

    if !result.is_valid() {
        bail!(
            "workspace '{}' has {} validation error(s)",
            workspace.id,
            result.errors.len()
        );
    }

    println!("{} workspace '{}' is valid", "✓".green(), workspace.id);
    Ok(())
}

pub fn agent_info(ctx: &CommandContext, id: &str, remote_folder: PathBuf) -> Result<()> {
    let workspace = ctx.load(id)?;
    println!("{}", workspace.agent_info(remote_folder).encode()?);
    Ok(())
}
