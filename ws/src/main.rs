// External crates
use clap::Parser;
use colored::Colorize;

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

fn main() {
    let _log_guard = ws_logging::init_subscriber();

    let args = Args::parse();
    tracing::debug!(command = ?args.command, "starting ws command");

    if let Err(e) = execute_command(args) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
