//! Command-line interface definition and dispatch for modelbook.
//!
//! Uses [`clap`] for argument parsing with derive macros. With no subcommand
//! the interactive editor starts; listing lives in the [`list`] submodule.

mod list;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ConfigStore;
use crate::settings::Settings;

/// Top-level CLI structure for modelbook.
#[derive(Parser)]
#[command(
    name = "modelbook",
    about = "Edit the custom models in your local config",
    version
)]
pub struct Cli {
    /// Config file to edit (default: ~/.factory/config.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Only write the file on Ctrl+W instead of after every change
    #[arg(long, global = true)]
    pub manual_save: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the modelbook CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive editor (default)
    Edit,
    /// Print the configured models
    List,
    /// Print the resolved config path
    Path,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.config, cli.manual_save)?;
    tracing::debug!(?settings, "resolved settings");

    match cli.command.unwrap_or(Commands::Edit) {
        Commands::Edit => crate::tui::run_tui(settings).await,
        Commands::List => list::print_models(&ConfigStore::new(&settings.config_path)),
        Commands::Path => {
            println!("{}", settings.config_path.display());
            Ok(())
        }
    }
}
