//! # ncc-cpp
//!
//! Tree-sitter based parser adapter for ncc.
//!
//! Turns C and C++ sources into the language-agnostic
//! [`ncc_core::DeclarationNode`] stream consumed by the ncc-core analyzer:
//!
//! - [`CppParser`] implements [`ncc_core::ParserAdapter`]
//! - [`Dialect`] picks the C or C++ grammar from compiler arguments
//! - [`extract_declarations`] walks an already parsed tree

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod declarator;
pub mod parser;
pub mod walker;

pub use parser::{CppParser, Dialect};
pub use walker::extract_declarations;
