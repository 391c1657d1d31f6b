//! Run coordinator: discovery → parse → classify → resolve → validate.

use crate::compdb::{CompilationDatabase, CompileDbError};
use crate::config::{Config, ConfigError};
use crate::discovery::{self, FileFilter, PathError};
use crate::parser::{ParseError, ParserAdapter, ParserBox};
use crate::style::{StyleError, StyleModel};
use crate::types::{AnalysisReport, ParseFailure, Violation};
use crate::validate::check_node;

use miette::Diagnostic;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Arguments used for files without a compilation database entry.
pub const DEFAULT_ARGS: &[&str] = &["-x", "c++"];

/// Errors that abort a run.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// Input paths could not be resolved.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    /// The style document is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Style(#[from] StyleError),

    /// The compilation database is unreadable.
    #[error(transparent)]
    #[diagnostic(transparent)]
    CompileDb(#[from] CompileDbError),

    /// The project configuration is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// No parser adapter was configured.
    #[error("no parser adapter configured")]
    #[diagnostic(code(ncc::analyzer::no_parser))]
    NoParser,

    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    #[diagnostic(code(ncc::analyzer::pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    roots: Vec<PathBuf>,
    recursive: bool,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    style: Option<StyleModel>,
    compile_db: Option<CompilationDatabase>,
    parallelism: Option<usize>,
    parser: Option<ParserBox>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root path (file or directory).
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(path.into());
        self
    }

    /// Adds multiple root paths.
    #[must_use]
    pub fn roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets whether directory roots are walked (default: false).
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the style model.
    #[must_use]
    pub fn style(mut self, style: StyleModel) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the compilation database.
    #[must_use]
    pub fn compile_db(mut self, db: CompilationDatabase) -> Self {
        self.compile_db = Some(db);
        self
    }

    /// Sets the number of worker threads (default: rayon's default).
    #[must_use]
    pub fn parallelism(mut self, jobs: usize) -> Self {
        self.parallelism = Some(jobs);
        self
    }

    /// Sets the parser adapter.
    #[must_use]
    pub fn parser<P: ParserAdapter + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Applies `[analyzer]` settings from a project config.
    ///
    /// Config paths, include and exclude patterns are used only when the
    /// builder has none of its own.
    #[must_use]
    pub fn config(mut self, config: &Config) -> Self {
        let analyzer = &config.analyzer;
        if self.roots.is_empty() {
            self.roots = analyzer
                .paths
                .iter()
                .map(|p| config.resolve_path(p))
                .collect();
        }
        self.recursive |= analyzer.recursive;
        if self.include_patterns.is_empty() {
            self.include_patterns.clone_from(&analyzer.include);
        }
        if self.exclude_patterns.is_empty() {
            self.exclude_patterns.clone_from(&analyzer.exclude);
        }
        if self.parallelism.is_none() {
            self.parallelism = analyzer.parallelism;
        }
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, a filter is not a valid glob,
    /// or the worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::NoParser)?;
        let filter = FileFilter::new(&self.include_patterns, &self.exclude_patterns)?;

        let roots = if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots
        };

        let pool = match self.parallelism {
            Some(jobs) if jobs > 0 => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()?,
            ),
            _ => None,
        };

        Ok(Analyzer {
            roots,
            recursive: self.recursive,
            filter,
            style: self.style.unwrap_or_default(),
            compile_db: self.compile_db.unwrap_or_default(),
            default_args: DEFAULT_ARGS.iter().map(ToString::to_string).collect(),
            pool,
            parser,
        })
    }
}

/// The main analyzer that orchestrates a naming check.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    roots: Vec<PathBuf>,
    recursive: bool,
    filter: FileFilter,
    style: StyleModel,
    compile_db: CompilationDatabase,
    default_args: Vec<String>,
    pool: Option<rayon::ThreadPool>,
    parser: ParserBox,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root paths being analyzed.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns the style model in use.
    #[must_use]
    pub fn style(&self) -> &StyleModel {
        &self.style
    }

    /// Lists the files a run would analyse.
    ///
    /// # Errors
    ///
    /// Returns an error if a root is missing or cannot be walked.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, PathError> {
        discovery::discover(&self.roots, self.recursive, &self.filter)
    }

    /// Analyzes all files and returns the report.
    ///
    /// Files that fail to parse are recorded in
    /// [`AnalysisReport::parse_failures`] and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn analyze(&self) -> Result<AnalysisReport, AnalyzerError> {
        info!(
            "Starting analysis of {} root(s) with {} parser",
            self.roots.len(),
            self.parser.name()
        );
        if self.style.is_empty() {
            info!("No naming rules configured; nothing will be reported");
        }

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        // Indexed collect keeps discovery order whatever order workers finish in.
        let run = || -> Vec<Result<Vec<Violation>, ParseError>> {
            files.par_iter().map(|f| self.analyze_file(f)).collect()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut report = AnalysisReport::new();
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(violations) => {
                    report.violations.extend(violations);
                    report.files_checked += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", file.display());
                    report.parse_failures.push(ParseFailure {
                        file: file.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Analysis complete: {} violations in {} files ({} skipped)",
            report.total(),
            report.files_checked,
            report.parse_failures.len()
        );

        Ok(report)
    }

    /// Parses one file and checks every declaration in it.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when the file cannot be parsed.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, ParseError> {
        let args = self
            .compile_db
            .arguments_for(path)
            .unwrap_or(self.default_args.as_slice());
        debug!("Analyzing: {} {:?}", path.display(), args);

        let parsed = self.parser.parse(path, args)?;
        Ok(parsed
            .into_declarations()
            .filter_map(|node| check_node(&node, &self.style))
            .collect())
    }
}
