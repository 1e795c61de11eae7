//! Entry point for modelbook, a terminal editor for custom model entries.
//!
//! This binary loads environment variables, sets up file logging, parses CLI
//! arguments via [`cli`], and dispatches to the chosen subcommand.

use anyhow::Result;
use modelbook::{cli, logging};

/// Runs the modelbook CLI.
///
/// Loads `.env` files (silently ignored if absent), installs the log file
/// subscriber (a failure there only disables logging), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if let Err(err) = logging::setup_logging() {
        eprintln!("warning: logging disabled: {err:#}");
    }
    let cli = cli::parse();
    cli::run(cli).await
}
