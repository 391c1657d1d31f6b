//! `compile_commands.json` reader.
//!
//! Only what the parser adapter needs is kept: per-file compiler arguments
//! without the compiler itself, `-c`, `-o <out>` or the source path.

use miette::Diagnostic;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up inside the database directory.
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// Errors reading a compilation database.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CompileDbError {
    /// The database file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(
        code(ncc::compdb::io),
        help("--cdbdir expects the directory containing compile_commands.json")
    )]
    Io {
        /// Database path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The database is not valid JSON or has the wrong shape.
    #[error("invalid compilation database {path}: {source}")]
    #[diagnostic(code(ncc::compdb::parse))]
    Parse {
        /// Database path.
        path: PathBuf,
        /// Deserializer error.
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CommandEntry {
    directory: PathBuf,
    file: PathBuf,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    command: Option<String>,
}

/// Compiler arguments per source file.
#[derive(Debug, Clone, Default)]
pub struct CompilationDatabase {
    entries: HashMap<PathBuf, Vec<String>>,
}

impl CompilationDatabase {
    /// Reads `dir/compile_commands.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn from_directory(dir: &Path) -> Result<Self, CompileDbError> {
        let path = dir.join(COMPILE_COMMANDS);
        let content = std::fs::read_to_string(&path).map_err(|source| CompileDbError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| CompileDbError::Parse { path, source })
    }

    /// Parses database JSON.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error for malformed input.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<CommandEntry> = serde_json::from_str(content)?;
        let mut entries = HashMap::with_capacity(raw.len());

        for entry in raw {
            let file = if entry.file.is_absolute() {
                entry.file
            } else {
                entry.directory.join(&entry.file)
            };
            let argv = match (entry.arguments, entry.command) {
                (Some(arguments), _) => arguments,
                (None, Some(command)) => split_command(&command),
                (None, None) => Vec::new(),
            };
            let args = strip_args(argv, &file);
            debug!("compdb entry {}: {:?}", file.display(), args);
            // First entry wins for files compiled more than once.
            entries.entry(normalize(&file)).or_insert(args);
        }

        Ok(Self { entries })
    }

    /// Arguments recorded for `path`, if the database has an entry.
    #[must_use]
    pub fn arguments_for(&self, path: &Path) -> Option<&[String]> {
        self.entries.get(&normalize(path)).map(Vec::as_slice)
    }

    /// Number of files with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the database has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Drops the compiler, `-c`, `-o <out>` and the source file from an argv.
fn strip_args(argv: Vec<String>, file: &Path) -> Vec<String> {
    let file_name = file.file_name();
    let mut out = Vec::with_capacity(argv.len());
    let mut iter = argv.into_iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" => {}
            "-o" => {
                iter.next();
            }
            _ if arg.starts_with("-o") && arg.len() > 2 => {}
            _ if !arg.starts_with('-')
                && (Path::new(&arg) == file || Path::new(&arg).file_name() == file_name) => {}
            _ => out.push(arg),
        }
    }

    out
}

/// Splits a shell command line on whitespace, honouring quotes and
/// backslash escapes.
fn split_command(command: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        args.push(current);
    }

    args
}
