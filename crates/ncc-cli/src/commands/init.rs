//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::ExitCode;

/// Starter style written by `ncc init`.
pub(crate) const DEFAULT_STYLE: &str = r#"# ncc naming style
#
# Keys are naming categories, values are regular expressions that must
# match the whole identifier. Categories left out are not checked.

ClassName: '^[A-Z][a-zA-Z0-9]*$'
StructName: '^[A-Z][a-zA-Z0-9]*$'
UnionName: '^[A-Z][a-zA-Z0-9]*$'
EnumName: '^[A-Z][a-zA-Z0-9]*$'
EnumConstantName: '^[A-Z][A-Z0-9_]*$'
NamespaceName: '^[a-z][a-z0-9_]*$'
FunctionName: '^[a-z][a-zA-Z0-9]*$'
MethodName: '^[a-z][a-zA-Z0-9]*$'
TypedefName: '^[A-Z][a-zA-Z0-9]*$'
MacroName: '^[A-Z][A-Z0-9_]*$'
ParameterName: '^[a-z][a-zA-Z0-9]*$'

# Variables share one composite rule: scope prefix + type prefix + pattern.
VariableName:
  ScopePrefix:
    Global: 'g_'
    Static: 's_'
    ClassMember: 'm_'
  DataTypePrefix:
    Pointer: 'p'
  Pattern: '^[a-z][a-zA-Z0-9]*$'
"#;

/// File written in the working directory.
pub(crate) const STYLE_FILE: &str = ".ncc-style.yml";

/// Runs the init command.
pub fn run(force: bool) -> Result<ExitCode> {
    write_style(Path::new(STYLE_FILE), force)?;

    println!("Created {STYLE_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {STYLE_FILE} to match your conventions");
    println!("  2. Run: ncc check --style {STYLE_FILE} --recurse src");

    Ok(ExitCode::SUCCESS)
}

fn write_style(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Style file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_STYLE)
        .with_context(|| format!("Failed to write {}", path.display()))
}
