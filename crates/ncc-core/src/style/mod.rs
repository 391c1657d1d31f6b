//! The style model: which pattern applies to which naming category.
//!
//! # Architecture
//!
//! ```text
//! YAML / JSON / TOML text
//!   ↓ serde (DTO layer)
//! dto::StyleDto
//!   ↓ validate + compile
//! StyleModel (immutable, shared by every file analysis)
//! ```

use crate::category::Category;
use miette::Diagnostic;
use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;
pub mod model;

pub use model::{CompiledPattern, CompositeRule, StyleModel, StyleRule};

/// Errors from loading a style document.
///
/// All of these are fatal: a run never starts with a malformed style.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum StyleError {
    /// The style file could not be read.
    #[error("failed to read style file {path}: {source}")]
    #[diagnostic(code(ncc::style::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid YAML/JSON/TOML or has the wrong shape.
    #[error("style document is not valid {format}: {message}")]
    #[diagnostic(
        code(ncc::style::syntax),
        help("top-level keys are category names; values are pattern strings, or a ScopePrefix/DataTypePrefix/Pattern mapping for VariableName")
    )]
    Syntax {
        /// Document format that was expected.
        format: &'static str,
        /// Deserializer message.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported style file format: {path}")]
    #[diagnostic(
        code(ncc::style::format),
        help("use a .yml, .yaml, .json or .toml file")
    )]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// A pattern is not a valid regular expression.
    #[error("\"{category}\" pattern \"{pattern}\" is not a valid regular expression")]
    #[diagnostic(code(ncc::style::pattern))]
    PatternCompile {
        /// Category the pattern belongs to.
        category: Category,
        /// The pattern (the composed one for `VariableName`).
        pattern: String,
        /// Regex engine message.
        #[help]
        reason: String,
    },

    /// `VariableName` was given as a mapping without `Pattern`.
    #[error("VariableName rule has no `Pattern` base fragment")]
    #[diagnostic(code(ncc::style::missing_base))]
    MissingBasePattern,

    /// A nested mapping was given for a category that takes one pattern.
    #[error("{category} takes a single pattern string, not a nested mapping")]
    #[diagnostic(code(ncc::style::unexpected_mapping))]
    UnexpectedComposite {
        /// The category.
        category: Category,
    },

    /// Unknown key under `VariableName.ScopePrefix`.
    #[error("unknown ScopePrefix key `{key}`")]
    #[diagnostic(
        code(ncc::style::scope),
        help("expected one of: Global, Static, ClassMember, Local")
    )]
    UnknownScope {
        /// The key.
        key: String,
    },

    /// Unknown key under `VariableName.DataTypePrefix`.
    #[error("unknown DataTypePrefix key `{key}`")]
    #[diagnostic(
        code(ncc::style::data_type),
        help("expected one of: String, Pointer, Integer, Bool, Other")
    )]
    UnknownDataType {
        /// The key.
        key: String,
    },

    /// The same category appears twice (e.g. under a legacy alias).
    #[error("{category} is configured more than once")]
    #[diagnostic(code(ncc::style::duplicate))]
    DuplicateCategory {
        /// The category.
        category: Category,
    },
}

/// Serialization format of a style document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl StyleFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

impl StyleModel {
    /// Loads a style document from a file, picking the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its format is unknown,
    /// or the document is malformed.
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let format = StyleFormat::from_path(path).ok_or_else(|| StyleError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, format)
    }

    /// Parses a style document.
    ///
    /// An empty or null document yields an empty model.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn parse(content: &str, format: StyleFormat) -> Result<Self, StyleError> {
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }

        let syntax = |message: String| StyleError::Syntax {
            format: format.name(),
            message,
        };

        let dto: Option<dto::StyleDto> = match format {
            StyleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| syntax(e.to_string()))?,
            StyleFormat::Json => serde_json::from_str(content).map_err(|e| syntax(e.to_string()))?,
            StyleFormat::Toml => {
                Some(toml::from_str(content).map_err(|e| syntax(e.to_string()))?)
            }
        };

        loader::load(dto.unwrap_or_default())
    }

    /// Builds a model from an inline TOML table, such as `[style]` in
    /// `ncc.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is malformed.
    pub fn from_toml_table(table: toml::Table) -> Result<Self, StyleError> {
        let dto: dto::StyleDto =
            toml::Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| StyleError::Syntax {
                    format: StyleFormat::Toml.name(),
                    message: e.to_string(),
                })?;
        loader::load(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::VariableScope;
    use crate::node::TypeClass;

    const YAML_STYLE: &str = r"
ClassName: '^C.*$'
FunctionName: '^[a-z_]+$'
VariableName:
  ScopePrefix:
    Global: 'g_'
    Static: 's_'
    ClassMember: 'm_'
  DataTypePrefix:
    String: 'str'
    Integer: 'n'
    Bool: 'b'
    Pointer: 'p'
  Pattern: '^[A-Z][a-zA-Z0-9]*$'
";

    #[test]
    fn parses_yaml_document() {
        let model = StyleModel::parse(YAML_STYLE, StyleFormat::Yaml).unwrap();
        assert_eq!(model.len(), 3);

        let Some(StyleRule::Composite(rule)) = model.rule(Category::VariableName) else {
            panic!("expected composite VariableName");
        };
        assert_eq!(
            rule.pattern_for(VariableScope::ClassMember, TypeClass::Pointer)
                .as_str(),
            "^m_p[A-Z][a-zA-Z0-9]*$"
        );
    }

    #[test]
    fn parses_json_document() {
        let json = r#"{"ClassName": "^C.*$", "VariableName": {"Pattern": "^.*$"}}"#;
        let model = StyleModel::parse(json, StyleFormat::Json).unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn parses_toml_document() {
        let toml = r#"
ClassName = "^C.*$"

[VariableName]
Pattern = "^.*$"

[VariableName.ScopePrefix]
ClassMember = "m_"
"#;
        let model = StyleModel::parse(toml, StyleFormat::Toml).unwrap();
        assert!(model.rule(Category::ClassName).is_some());
        assert!(model.rule(Category::VariableName).is_some());
    }

    #[test]
    fn empty_and_null_documents_are_empty_models() {
        assert!(StyleModel::parse("", StyleFormat::Yaml).unwrap().is_empty());
        assert!(StyleModel::parse("~\n", StyleFormat::Yaml).unwrap().is_empty());
        assert!(StyleModel::parse("null", StyleFormat::Json).unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_is_syntax_error() {
        let err = StyleModel::parse("- ClassName\n- StructName\n", StyleFormat::Yaml).unwrap_err();
        assert!(matches!(err, StyleError::Syntax { format: "YAML", .. }));
    }

    #[test]
    fn unknown_composite_key_is_syntax_error() {
        let err = StyleModel::parse(
            "VariableName:\n  Prefix: 'x'\n  Pattern: '.*'\n",
            StyleFormat::Yaml,
        )
        .unwrap_err();
        assert!(matches!(err, StyleError::Syntax { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            StyleFormat::from_path(Path::new("style.yml")),
            Some(StyleFormat::Yaml)
        );
        assert_eq!(
            StyleFormat::from_path(Path::new("a/b/style.json")),
            Some(StyleFormat::Json)
        );
        assert_eq!(StyleFormat::from_path(Path::new("style.ini")), None);
        assert_eq!(StyleFormat::from_path(Path::new("style")), None);
    }

    #[test]
    fn from_file_rejects_unknown_extension() {
        let err = StyleModel::from_file(Path::new("does-not-matter.ini")).unwrap_err();
        assert!(matches!(err, StyleError::UnsupportedFormat { .. }));
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        std::fs::write(&path, YAML_STYLE).unwrap();
        let model = StyleModel::from_file(&path).unwrap();
        assert!(model.rule(Category::FunctionName).is_some());
    }

    #[test]
    fn inline_toml_table() {
        let table: toml::Table = toml::from_str("ClassName = '^C.*$'").unwrap();
        let model = StyleModel::from_toml_table(table).unwrap();
        assert_eq!(model.len(), 1);
    }
}
