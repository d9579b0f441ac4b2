//! rebrand - A one-shot project rename tool
//!
//! rebrand:
//! - Moves the project's own files and directories to their new names
//! - Rewrites references in text files through an ordered set of patterns
//! - Points the git remote at the renamed repository
//! - Previews everything unless asked to execute

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod rename;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);
    cli::run(cli)
}

/// Initialize diagnostics on stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
