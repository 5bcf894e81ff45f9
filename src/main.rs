use anyhow::{Context, Result};
use clap::Parser;
use cli_manpage::config::{self, MarkupMode, RenderConfig};
use cli_manpage::spec::{load_spec, SpecStats};
use cli_manpage::{render_man_page, RenderSummary};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CheckArgs, Command, ConfigArgs, RenderArgs, RootArgs};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut config = config::resolve_config(args.config.as_deref())?;
    if args.raw {
        config.markup_mode = MarkupMode::Raw;
    }
    if let Some(width) = args.width {
        config.wrap_width = width;
    }
    if !args.authors.is_empty() {
        config.authors = args.authors;
    }
    config::validate_config(&config).context("validate command-line overrides")?;

    let spec = load_spec(&args.spec)?;
    let rendered = render_man_page(&spec, &config)?;
    match &args.out {
        Some(path) => {
            write_output(path, &rendered.man_page)?;
            tracing::info!(path = %path.display(), "wrote man page");
        }
        None => print!("{}", rendered.man_page),
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport {
    program_name: String,
    spec: SpecStats,
    render: RenderSummary,
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    let config: RenderConfig = config::resolve_config(args.config.as_deref())?;
    let spec = load_spec(&args.spec)?;
    let rendered = render_man_page(&spec, &config)?;
    let report = CheckReport {
        program_name: spec.parser.program_name.clone(),
        spec: spec.parser.stats(),
        render: rendered.summary,
    };

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize check report")?;
        println!("{text}");
        return Ok(());
    }
    println!(
        "{}: {} groups, {} actions, {} subcommands (depth {}), {} sections",
        report.program_name,
        report.spec.groups,
        report.spec.actions,
        report.spec.subcommands,
        report.spec.max_depth,
        report.render.headings.len()
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let stub = config::config_stub()?;
    match &args.out {
        Some(path) => write_output(path, &format!("{stub}\n")),
        None => {
            println!("{stub}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))
}
