//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::model::{Mode, RenameJob};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::rename::renamer::Renamer;

/// rebrand - rename claude-code.nvim to claude-code-ide.nvim in place.
#[derive(Parser, Debug)]
#[command(name = "rebrand")]
#[command(
    author,
    version,
    about,
    long_about = r#"rebrand renames the claude-code.nvim project to claude-code-ide.nvim.

It runs three steps over the project root:
1) move lua/claude-code, doc/claude-code.txt and plugin/claude-code.lua
2) rewrite references in text files (lua, md, txt, sh, nix, yaml, yml, json,
   Justfile, Makefile, LICENSE, CHANGELOG)
3) update the remote URL in .git/config

Without --execute nothing is written: every action is only reported.

Examples:
    rebrand
    rebrand --path ~/src/claude-code.nvim
    rebrand --path ~/src/claude-code.nvim --execute
    rebrand --format jsonl
"#
)]
pub struct Cli {
    /// Root of the project tree.
    #[arg(
        long,
        env = "REBRAND_PATH",
        default_value = ".",
        value_name = "DIR",
        long_help = "Root of the project tree to operate on (defaults to the current directory).\n\n\
All paths in the report are relative to this root."
    )]
    pub path: PathBuf,

    /// Apply the changes (default is a dry run).
    #[arg(
        long,
        long_help = "Apply the rename. Without this flag the run is a preview: every change is\n\
reported but no file is moved or written."
    )]
    pub execute: bool,

    /// Output format (text/jsonl/json).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): running commentary followed by a summary\n\
- jsonl: one JSON object per change, summary last\n\
- json: a single JSON document"
    )]
    pub format: String,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. Colors are also disabled when NO_COLOR is set or\n\
stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (summary only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid --format")?;

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let renderer = Renderer::with_config(
        RenderConfig::new(format)
            .with_color(color)
            .with_quiet(cli.quiet),
    );

    // Get absolute root path
    let root = cli.path.canonicalize().unwrap_or(cli.path);
    let job = RenameJob::new(root, Mode::from_execute(cli.execute));

    let renamer = Renamer::new(job.clone())?;
    let renamer = if renderer.streams() {
        println!("{}", renderer.banner(&job));
        renamer.with_echo(&renderer)
    } else {
        renamer
    };

    let log = renamer.run();
    println!("{}", renderer.render(&log));

    Ok(())
}
