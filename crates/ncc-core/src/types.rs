//! Core types for naming violations and run reports.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// File path as discovered.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// An identifier that failed the pattern resolved for its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Category whose rule was applied.
    pub category: Category,
    /// The offending identifier.
    pub spelling: String,
    /// The pattern actually matched against (the full composite for
    /// variable rules).
    pub pattern: String,
    /// Where the identifier was declared.
    pub location: Location,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        category: Category,
        spelling: impl Into<String>,
        pattern: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            category,
            spelling: spelling.into(),
            pattern: pattern.into(),
            location,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\" does not match \"{}\" associated with {}",
            self.location, self.spelling, self.pattern, self.category
        )
    }
}

/// A file that was skipped because the parser adapter could not handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// The skipped file.
    pub file: PathBuf,
    /// Why it was skipped.
    pub message: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Result of one analysis run.
///
/// Violations are ordered by file discovery order, then by traversal order
/// within each file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files parsed and checked.
    pub files_checked: usize,
    /// Files that could not be parsed.
    pub parse_failures: Vec<ParseFailure>,
}

impl AnalysisReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of violations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.violations.len()
    }

    /// Returns true when no violation was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Renders the report as diagnostic lines followed by the total line.
    #[must_use]
    pub fn format_text(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for v in &self.violations {
            let _ = writeln!(out, "{v}");
        }
        let _ = writeln!(out, "Total number of errors = {}", self.total());
        out
    }
}
