//! Deserialization types for style documents (DTO layer).
//!
//! These types exist solely for serde. They mirror the document shape
//! one-to-one and are converted to the validated [`super::StyleModel`] by
//! the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw style document: category key → rule.
///
/// A `BTreeMap` keeps loading order independent of document order.
pub type StyleDto = BTreeMap<String, RuleDto>;

/// Raw value of one category entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleDto {
    /// `ClassName: '^[A-Z].*$'`
    Pattern(String),
    /// `VariableName: { ScopePrefix: ..., DataTypePrefix: ..., Pattern: ... }`
    Composite(CompositeRuleDto),
}

/// Raw nested rule for `VariableName`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeRuleDto {
    /// Scope name (`Global`, `Static`, `ClassMember`, `Local`) → prefix fragment.
    #[serde(rename = "ScopePrefix", default)]
    pub scope_prefix: BTreeMap<String, String>,

    /// Type class (`String`, `Pointer`, `Integer`, `Bool`, `Other`) → prefix fragment.
    #[serde(rename = "DataTypePrefix", default)]
    pub data_type_prefix: BTreeMap<String, String>,

    /// Base pattern fragment (required).
    #[serde(rename = "Pattern", default)]
    pub pattern: Option<String>,
}
