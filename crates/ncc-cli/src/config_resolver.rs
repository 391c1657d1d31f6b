//! Configuration file resolution with global fallback.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `ncc.toml` or `.ncc.toml` in the working directory
//! 3. `$NCC_CONFIG_DIR/config.toml`, else `~/.ncc/config.toml`
//! 4. No config found → defaults

use anyhow::{Context, Result};
use ncc_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config comes from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Loads the config this source points at, or the defaults.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::new());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }
        Ok(Config::from_file(path)?)
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["ncc.toml", ".ncc.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for a run started in the working
/// directory.
pub fn resolve(explicit: Option<&Path>) -> Result<ConfigSource> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    Ok(resolve_inner(&cwd, explicit, global_config_dir()))
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// `$NCC_CONFIG_DIR`, else `~/.ncc/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("NCC_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".ncc"))
}
