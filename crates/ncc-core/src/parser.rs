//! The parser adapter seam.
//!
//! Grammar-specific crates implement [`ParserAdapter`]; the analyzer only
//! ever sees the [`DeclarationNode`] stream it produces.

use crate::node::DeclarationNode;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file could not be turned into declarations.
///
/// Recovered per file: the analyzer records it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The source has syntax errors.
    #[error("syntax error in {path} at line {line}")]
    Syntax {
        /// The file.
        path: PathBuf,
        /// First line with an error (1-indexed).
        line: usize,
    },

    /// The adapter could not be set up for this file.
    #[error("cannot parse {path}: {message}")]
    Unsupported {
        /// The file.
        path: PathBuf,
        /// Reason.
        message: String,
    },
}

/// Declarations of one parsed file.
///
/// A finite sequence that can be consumed exactly once.
pub struct ParsedFile {
    declarations: Box<dyn Iterator<Item = DeclarationNode> + Send>,
}

impl ParsedFile {
    /// Wraps a declaration stream.
    pub fn new<I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = DeclarationNode>,
        I::IntoIter: Send + 'static,
    {
        Self {
            declarations: Box::new(declarations.into_iter()),
        }
    }

    /// Consumes the file, yielding its declarations in traversal order.
    pub fn into_declarations(self) -> impl Iterator<Item = DeclarationNode> {
        self.declarations
    }
}

impl fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFile").finish_non_exhaustive()
    }
}

/// Turns a source file into declaration nodes.
///
/// Implementations are shared across worker threads.
pub trait ParserAdapter: Send + Sync {
    /// Short adapter name for logs.
    fn name(&self) -> &'static str;

    /// Parses `path` with the given compiler arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when no declarations can be produced.
    fn parse(&self, path: &Path, args: &[String]) -> Result<ParsedFile, ParseError>;
}

/// Boxed adapter, as stored by the analyzer.
pub type ParserBox = Box<dyn ParserAdapter>;
