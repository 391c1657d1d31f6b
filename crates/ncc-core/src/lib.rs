//! # ncc-core
//!
//! Rule-resolution and classification engine for C/C++ naming conventions.
//!
//! This crate is independent of any C/C++ front-end. It provides:
//!
//! - [`StyleModel`] for the loaded naming convention (YAML, JSON or TOML)
//! - [`classify`], [`resolve`] and [`validate`] for the per-declaration chain
//! - [`discover`] for include/exclude filtered file selection
//! - [`ParserAdapter`], the seam a grammar crate implements
//! - [`Analyzer`] for orchestrating a run across files
//!
//! ## Example
//!
//! ```ignore
//! use ncc_core::{Analyzer, StyleModel, StyleFormat};
//!
//! let style = StyleModel::parse("ClassName: '^C.*$'", StyleFormat::Yaml)?;
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .recursive(true)
//!     .style(style)
//!     .parser(MyParser::new())
//!     .build()?;
//!
//! let report = analyzer.analyze()?;
//! print!("{}", report.format_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod category;
mod classify;
mod compdb;
mod config;
mod discovery;
mod node;
mod parser;
mod resolve;
mod types;
mod validate;

/// Style documents and the compiled style model.
pub mod style;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, DEFAULT_ARGS};
pub use category::{Category, VariableScope};
pub use classify::classify;
pub use compdb::{CompilationDatabase, CompileDbError, COMPILE_COMMANDS};
pub use config::{AnalyzerConfig, Config, ConfigError};
pub use discovery::{discover, FileFilter, PathError, DEFAULT_EXTENSIONS};
pub use node::{DeclarationNode, EnclosingScope, NodeKind, ScopeKind, StorageClass, TypeClass};
pub use parser::{ParseError, ParsedFile, ParserAdapter, ParserBox};
pub use resolve::{resolve, ResolvedPattern};
pub use style::{StyleError, StyleFormat, StyleModel, StyleRule};
pub use types::{AnalysisReport, Location, ParseFailure, Violation};
pub use validate::{check_node, validate};
