//! List rules command implementation.

use anyhow::Result;
use ncc_core::{Category, StyleModel, StyleRule, TypeClass, VariableScope};
use std::fmt::Write;
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver;

/// Runs the list-rules command.
pub fn run(style: Option<&Path>, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = config_resolver::resolve(config_path)?.load()?;
    let model = super::load_style(style, &config)?;
    print!("{}", render(&model));
    Ok(ExitCode::SUCCESS)
}

/// One line per category; `-` marks categories that are not checked.
fn render(model: &StyleModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} Pattern", "Category");
    let _ = writeln!(out, "{}", "-".repeat(60));

    for category in Category::ALL {
        match model.rule(category) {
            None => {
                let _ = writeln!(out, "{:<24} -", category.name());
            }
            Some(StyleRule::Simple(pattern)) => {
                let _ = writeln!(out, "{:<24} {}", category.name(), pattern.as_str());
            }
            Some(StyleRule::Composite(rule)) => {
                let _ = writeln!(out, "{:<24} {}", category.name(), rule.base());
                for scope in VariableScope::ALL {
                    let fragment = rule.scope_fragment(scope);
                    if !fragment.is_empty() {
                        let _ = writeln!(out, "{:<24}   scope {scope:?}: {fragment}", "");
                    }
                }
                for type_class in TypeClass::ALL {
                    let fragment = rule.data_type_fragment(type_class);
                    if !fragment.is_empty() {
                        let _ = writeln!(out, "{:<24}   type {type_class:?}: {fragment}", "");
                    }
                }
            }
        }
    }
    out
}
