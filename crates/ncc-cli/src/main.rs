//! ncc CLI tool.
//!
//! Usage:
//! ```bash
//! ncc check [OPTIONS] [PATH]...
//! ncc list-rules [--style FILE]
//! ncc init [--force]
//! ```

use clap::{Parser, Subcommand};
use ncc_core::{AnalyzerError, CompileDbError, ConfigError, PathError, StyleError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Naming convention checker for C and C++ sources
#[derive(Parser)]
#[command(name = "ncc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NCC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check identifiers against a naming style
    Check(commands::check::CheckArgs),

    /// Show the pattern configured for every category
    ListRules {
        /// Style file (YAML, JSON or TOML)
        #[arg(short, long)]
        style: Option<PathBuf>,
    },

    /// Write a starter style file
    Init {
        /// Overwrite existing style file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One diagnostic per line followed by the total.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Exit status when the run could not complete.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Check(args) => commands::check::run(&args, cli.config.as_deref()),
        Commands::ListRules { style } => {
            commands::list_rules::run(style.as_deref(), cli.config.as_deref())
        }
        Commands::Init { force } => commands::init::run(force),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", into_report(err));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Recovers the library diagnostic behind an error so miette can render
/// its code and help text.
fn into_report(err: anyhow::Error) -> miette::Report {
    let err = match err.downcast::<AnalyzerError>() {
        Ok(e) => return miette::Report::new(e),
        Err(err) => err,
    };
    let err = match err.downcast::<StyleError>() {
        Ok(e) => return miette::Report::new(e),
        Err(err) => err,
    };
    let err = match err.downcast::<ConfigError>() {
        Ok(e) => return miette::Report::new(e),
        Err(err) => err,
    };
    let err = match err.downcast::<CompileDbError>() {
        Ok(e) => return miette::Report::new(e),
        Err(err) => err,
    };
    let err = match err.downcast::<PathError>() {
        Ok(e) => return miette::Report::new(e),
        Err(err) => err,
    };
    miette::miette!("{err:#}")
}
