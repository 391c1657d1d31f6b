//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use ncc_core::{Analyzer, CompilationDatabase};
use ncc_cpp::CppParser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::output;
use crate::config_resolver;
use crate::OutputFormat;

/// Arguments of `ncc check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files or directories to check (default: config paths, else `.`)
    pub paths: Vec<PathBuf>,

    /// Descend into directories
    #[arg(short, long)]
    pub recurse: bool,

    /// Style file (YAML, JSON or TOML)
    #[arg(short, long)]
    pub style: Option<PathBuf>,

    /// Directory containing compile_commands.json
    #[arg(long)]
    pub cdbdir: Option<PathBuf>,

    /// Only check files matching this glob (repeatable)
    #[arg(long = "filetype")]
    pub filetypes: Vec<String>,

    /// Skip files and directories matching this glob (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Number of files analysed in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Keep checking files that contain syntax errors
    #[arg(long)]
    pub tolerant: bool,
}

/// Runs the check command.
///
/// Returns exit status 1 when violations were found.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let source = config_resolver::resolve(config_path)?;
    let config = source.load()?;
    let style = super::load_style(args.style.as_deref(), &config)?;

    let mut builder = Analyzer::builder()
        .roots(args.paths.iter().cloned())
        .recursive(args.recurse)
        .excludes(args.exclude.iter().cloned())
        .style(style);
    for pattern in &args.filetypes {
        builder = builder.include(pattern.clone());
    }
    if let Some(jobs) = args.jobs {
        builder = builder.parallelism(jobs);
    }

    let cdb_dir = args.cdbdir.clone().or_else(|| {
        config
            .analyzer
            .compile_commands_dir
            .as_deref()
            .map(|dir| config.resolve_path(dir))
    });
    if let Some(dir) = cdb_dir {
        let db = CompilationDatabase::from_directory(&dir)?;
        tracing::info!("Loaded {} compile commands from {}", db.len(), dir.display());
        builder = builder.compile_db(db);
    }

    let tolerant = args.tolerant || config.analyzer.tolerate_syntax_errors;
    let analyzer = builder
        .parser(CppParser::new().tolerant(tolerant))
        .config(&config)
        .build()?;

    tracing::info!(
        "Checking {:?} against {} naming rules",
        analyzer.roots(),
        analyzer.style().len()
    );

    let report = analyzer.analyze()?;

    let rendered = output::render(&report, args.format)?;
    output::emit(&rendered, args.output.as_deref())
        .context("Failed to write report")?;
    output::print_parse_failures(&report);

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
