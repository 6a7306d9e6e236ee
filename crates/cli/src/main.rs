//! OXTest CLI - Main Entry Point
//!
//! Checks, dumps and normalises OXTest browser-automation scripts.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

mod commands;
mod config;
mod output;

use commands::{check, fmt, parse, tokens};
use config::{OxtestConfig, DEFAULT_CONFIG_FILE};

/// OXTest CLI - line-oriented browser automation scripts
#[derive(Parser)]
#[command(name = "oxtest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (defaults to the config file, then table)
    #[arg(long, global = true)]
    format: Option<output::OutputFormat>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every line that fails to parse
    Check(check::CheckArgs),

    /// Print the parsed commands of a script
    Parse(parse::ParseArgs),

    /// Print the tokens of a single line
    Tokens(tokens::TokensArgs),

    /// Rewrite a script in canonical form
    Fmt(fmt::FmtArgs),

    /// Show version information
    Version,
}

fn load_config(path: &Path) -> anyhow::Result<OxtestConfig> {
    let config = OxtestConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ok = match cli.command {
        Commands::Check(args) => {
            let config = load_config(&cli.config)?;
            check::execute(args, config.output_format(cli.format))?
        }
        Commands::Parse(args) => {
            let config = load_config(&cli.config)?;
            parse::execute(args, config.on_error, config.output_format(cli.format))?;
            true
        }
        Commands::Tokens(args) => {
            let config = load_config(&cli.config)?;
            tokens::execute(args, config.output_format(cli.format))?;
            true
        }
        Commands::Fmt(args) => fmt::execute(args)?,
        Commands::Version => {
            println!("OXTest CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Language core v{}", oxtest_core::VERSION);
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
