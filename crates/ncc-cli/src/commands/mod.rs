//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::Result;
use ncc_core::{Config, StyleModel};
use std::path::Path;

/// Loads the style for a run: `--style` first, then whatever the project
/// config names, then the empty model.
pub(crate) fn load_style(explicit: Option<&Path>, config: &Config) -> Result<StyleModel> {
    if let Some(path) = explicit {
        tracing::debug!("Loading style from {}", path.display());
        return Ok(StyleModel::from_file(path)?);
    }
    Ok(config.load_style()?.unwrap_or_default())
}
