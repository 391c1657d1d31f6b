//! Project configuration (`ncc.toml`).

use crate::style::{StyleError, StyleModel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Style document to load, relative to the config file.
    #[serde(default)]
    pub style_file: Option<PathBuf>,

    /// Inline style table, used when no style file is given.
    #[serde(default)]
    pub style: Option<toml::Table>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Directory the config was loaded from; relative paths resolve
    /// against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Resolves a config-relative path.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// The style file path, resolved against the config directory.
    #[must_use]
    pub fn style_path(&self) -> Option<PathBuf> {
        self.style_file.as_deref().map(|p| self.resolve_path(p))
    }

    /// Loads the configured style: `style_file` first, then the inline
    /// `[style]` table. `None` when neither is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the style document is malformed.
    pub fn load_style(&self) -> Result<Option<StyleModel>, StyleError> {
        if let Some(path) = self.style_path() {
            return StyleModel::from_file(&path).map(Some);
        }
        self.style
            .clone()
            .map(StyleModel::from_toml_table)
            .transpose()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Paths to analyse when none are given on the command line.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Descend into directories.
    #[serde(default)]
    pub recursive: bool,

    /// Include globs (if empty, the default C/C++ extensions).
    #[serde(default)]
    pub include: Vec<String>,

    /// Exclude globs, matched against basenames and root-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Directory holding `compile_commands.json`.
    #[serde(default)]
    pub compile_commands_dir: Option<PathBuf>,

    /// Keep checking files that contain syntax errors.
    #[serde(default)]
    pub tolerate_syntax_errors: bool,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(ncc::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config text.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(ncc::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Parse error in a config file.
    #[error("Failed to parse config file {path}: {message}")]
    #[diagnostic(code(ncc::config::parse))]
    ParseFile {
        /// Config path.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.analyzer.recursive);
        assert!(config.analyzer.paths.is_empty());
        assert!(config.style_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
style_file = "style/ncc.yml"

[analyzer]
paths = ["src", "include"]
recursive = true
exclude = ["third_party"]
parallelism = 4
compile_commands_dir = "build"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.paths, [PathBuf::from("src"), PathBuf::from("include")]);
        assert!(config.analyzer.recursive);
        assert_eq!(config.analyzer.parallelism, Some(4));
        assert!(!config.analyzer.tolerate_syntax_errors);
        assert_eq!(config.style_path(), Some(PathBuf::from("style/ncc.yml")));
    }

    #[test]
    fn test_inline_style_table() {
        let toml = r#"
[style]
ClassName = "^C.*$"

[style.VariableName]
Pattern = "^.*$"
"#;
        let config = Config::parse(toml).unwrap();
        let style = config.style.unwrap();
        assert_eq!(style["ClassName"].as_str(), Some("^C.*$"));
        assert!(style["VariableName"].is_table());
    }

    #[test]
    fn test_style_path_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ncc.toml");
        std::fs::write(&path, "style_file = \"ncc.yml\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.style_path(), Some(dir.path().join("ncc.yml")));
    }

    #[test]
    fn test_load_style_prefers_file_over_inline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ncc.yml"), "StructName: '^S.*$'\n").unwrap();
        let path = dir.path().join("ncc.toml");
        std::fs::write(
            &path,
            "style_file = \"ncc.yml\"\n\n[style]\nClassName = \"^C.*$\"\n",
        )
        .unwrap();

        let style = Config::from_file(&path).unwrap().load_style().unwrap().unwrap();
        assert_eq!(style.len(), 1);
        assert!(style.rule(crate::Category::StructName).is_some());
    }

    #[test]
    fn test_load_style_inline_and_absent() {
        let inline = Config::parse("[style]\nClassName = \"^C.*$\"\n").unwrap();
        assert_eq!(inline.load_style().unwrap().unwrap().len(), 1);
        assert!(Config::default().load_style().unwrap().is_none());
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ncc.toml");
        std::fs::write(&path, "[analyzer\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile { .. }));
    }
}
