//! CLI argument parsing for `climan`.
//!
//! The CLI only wires files to the renderer; every rendering decision lives
//! in the library so other tools can call it directly.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "climan",
    version,
    about = "Render ROFF man pages from JSON command-line descriptions",
    after_help = "Examples:\n  climan render --spec cli.json --out duh.1\n  climan render --spec cli.json --raw --author 'Jo <jo@example.org>'\n  climan check --spec cli.json\n  climan config --out ~/.config/climan/config.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Render(RenderArgs),
    Check(CheckArgs),
    Config(ConfigArgs),
}

/// Render command inputs.
#[derive(Parser, Debug)]
#[command(about = "Render a man page from a CLI description")]
pub struct RenderArgs {
    /// JSON CLI description
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Render config (defaults to the per-user config when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the page here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Treat help and description text as pre-escaped markup
    #[arg(long)]
    pub raw: bool,

    /// Wrap width for help and description text
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Author line for the AUTHORS section (repeatable)
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,
}

/// Check command inputs.
#[derive(Parser, Debug)]
#[command(about = "Load and render a CLI description without writing it")]
pub struct CheckArgs {
    /// JSON CLI description
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Render config (defaults to the per-user config when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Config command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the default render config")]
pub struct ConfigArgs {
    /// Write the stub here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
