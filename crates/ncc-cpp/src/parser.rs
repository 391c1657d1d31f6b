//! [`ParserAdapter`] implementation backed by tree-sitter.

use crate::walker::extract_declarations;
use ncc_core::{ParseError, ParsedFile, ParserAdapter};
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

/// Source language selected from compiler arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// C (`-x c`, `-std=c11`, `-std=gnu99`, ...).
    C,
    /// C++ (everything else).
    Cpp,
}

impl Dialect {
    /// Picks the dialect from compiler arguments. The last `-x` or `-std=`
    /// wins, as it does for the compiler.
    #[must_use]
    pub fn from_args(args: &[String]) -> Self {
        let mut dialect = Self::Cpp;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let language = if arg == "-x" {
                iter.next().map(String::as_str)
            } else {
                arg.strip_prefix("-x")
            };
            if let Some(language) = language {
                dialect = match language {
                    "c" | "c-header" => Self::C,
                    _ => Self::Cpp,
                };
                continue;
            }
            if let Some(std) = arg.strip_prefix("-std=") {
                dialect = if std.contains("++") {
                    Self::Cpp
                } else {
                    Self::C
                };
            }
        }
        dialect
    }

    fn language(self) -> Language {
        match self {
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        }
    }
}

/// Parses C and C++ files with tree-sitter.
///
/// A file with syntax errors is a [`ParseError`] unless the parser is
/// [tolerant](CppParser::tolerant).
#[derive(Debug, Clone, Default)]
pub struct CppParser {
    tolerant: bool,
}

impl CppParser {
    /// Creates a strict parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps declarations outside syntax error regions instead of
    /// rejecting the file.
    #[must_use]
    pub fn tolerant(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    /// Parses in-memory source.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the grammar cannot be loaded or the
    /// source has syntax errors and the parser is strict.
    pub fn parse_source(
        &self,
        path: &Path,
        source: &[u8],
        dialect: Dialect,
    ) -> Result<ParsedFile, ParseError> {
        let unsupported = |message: String| ParseError::Unsupported {
            path: path.to_path_buf(),
            message,
        };

        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| unsupported(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| unsupported("parser returned no tree".to_string()))?;
        let root = tree.root_node();

        if root.has_error() {
            let line = first_error(root).map_or(1, |n| n.start_position().row + 1);
            if !self.tolerant {
                return Err(ParseError::Syntax {
                    path: path.to_path_buf(),
                    line,
                });
            }
            debug!("{}: syntax error at line {line}, continuing", path.display());
        }

        Ok(ParsedFile::new(extract_declarations(root, source, path)))
    }
}

impl ParserAdapter for CppParser {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn parse(&self, path: &Path, args: &[String]) -> Result<ParsedFile, ParseError> {
        let source = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dialect = Dialect::from_args(args);
        debug!("Parsing {} as {dialect:?}", path.display());
        self.parse_source(path, &source, dialect)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dialect_defaults_to_cpp() {
        assert_eq!(Dialect::from_args(&[]), Dialect::Cpp);
        assert_eq!(Dialect::from_args(&args(&["-x", "c++"])), Dialect::Cpp);
    }

    #[test]
    fn dialect_from_language_flag() {
        assert_eq!(Dialect::from_args(&args(&["-x", "c"])), Dialect::C);
        assert_eq!(Dialect::from_args(&args(&["-xc"])), Dialect::C);
        assert_eq!(Dialect::from_args(&args(&["-x", "c", "-x", "c++"])), Dialect::Cpp);
    }

    #[test]
    fn dialect_from_std_flag() {
        assert_eq!(Dialect::from_args(&args(&["-std=c11"])), Dialect::C);
        assert_eq!(Dialect::from_args(&args(&["-std=gnu99"])), Dialect::C);
        assert_eq!(Dialect::from_args(&args(&["-std=c++17"])), Dialect::Cpp);
        assert_eq!(Dialect::from_args(&args(&["-std=gnu++20"])), Dialect::Cpp);
    }

    #[test]
    fn strict_parser_rejects_syntax_errors() {
        let err = CppParser::new()
            .parse_source(Path::new("bad.cpp"), b"class {{ int ;\n", Dialect::Cpp)
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn tolerant_parser_keeps_good_declarations() {
        let src = b"int good_one;\nvoid f( {\n";
        let parsed = CppParser::new()
            .tolerant(true)
            .parse_source(Path::new("bad.cpp"), src, Dialect::Cpp)
            .unwrap();
        let names: Vec<String> = parsed.into_declarations().map(|d| d.spelling).collect();
        assert!(names.contains(&"good_one".to_string()), "{names:?}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CppParser::new()
            .parse(Path::new("/definitely/not/here.cpp"), &[])
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
