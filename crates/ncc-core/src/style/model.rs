//! Validated, immutable style model.
//!
//! No serde and no I/O here. Every pattern is compiled at construction, so
//! a constructed [`StyleModel`] can never fail at validation time.

use crate::category::{Category, VariableScope};
use crate::node::TypeClass;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ────────────────────────────────────────────
// Compiled patterns
// ────────────────────────────────────────────

/// A pattern string together with its full-match regex.
///
/// The matcher is `^(?:source)$`, so a pattern always has to cover the whole
/// identifier even when the author left out the anchors.
#[derive(Clone)]
pub struct CompiledPattern {
    source: String,
    matcher: Regex,
}

impl CompiledPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `source` is not a valid expression.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let matcher = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self { source, matcher })
    }

    /// The pattern as written (or as composed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests whether `spelling` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, spelling: &str) -> bool {
        self.matcher.is_match(spelling)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.source).finish()
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

// ────────────────────────────────────────────
// Composite variable rule
// ────────────────────────────────────────────

/// The nested `VariableName` rule.
///
/// Holds the raw fragments plus one compiled pattern for every
/// (scope, type class) pair, built eagerly.
#[derive(Debug, Clone)]
pub struct CompositeRule {
    scope_prefix: BTreeMap<VariableScope, String>,
    data_type_prefix: BTreeMap<TypeClass, String>,
    base: String,
    resolved: Vec<CompiledPattern>,
}

impl CompositeRule {
    /// Builds the rule and compiles all scope/type combinations.
    ///
    /// # Errors
    ///
    /// Returns the composed pattern and the regex error for the first
    /// combination that does not compile.
    pub fn new(
        scope_prefix: BTreeMap<VariableScope, String>,
        data_type_prefix: BTreeMap<TypeClass, String>,
        base: impl Into<String>,
    ) -> Result<Self, (String, regex::Error)> {
        let mut rule = Self {
            scope_prefix,
            data_type_prefix,
            base: base.into(),
            resolved: Vec::with_capacity(VariableScope::ALL.len() * TypeClass::ALL.len()),
        };

        for scope in VariableScope::ALL {
            for type_class in TypeClass::ALL {
                let composed = rule.compose(scope, type_class);
                let compiled = CompiledPattern::new(composed.clone()).map_err(|e| (composed, e))?;
                rule.resolved.push(compiled);
            }
        }

        Ok(rule)
    }

    /// Prefix fragment configured for a scope, or `""`.
    #[must_use]
    pub fn scope_fragment(&self, scope: VariableScope) -> &str {
        self.scope_prefix.get(&scope).map_or("", String::as_str)
    }

    /// Prefix fragment configured for a type class, or `""`.
    #[must_use]
    pub fn data_type_fragment(&self, type_class: TypeClass) -> &str {
        self.data_type_prefix.get(&type_class).map_or("", String::as_str)
    }

    /// The base fragment.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Concatenates scope, datatype and base fragments in that order.
    ///
    /// Anchors are hoisted: a leading `^` or trailing `$` on any fragment is
    /// dropped and the result is anchored once around the whole expression.
    /// A fragment with an alternation is grouped so the `|` stays inside it.
    #[must_use]
    pub fn compose(&self, scope: VariableScope, type_class: TypeClass) -> String {
        let body: String = [
            self.scope_fragment(scope),
            self.data_type_fragment(type_class),
            self.base.as_str(),
        ]
        .into_iter()
        .map(strip_anchors)
        .map(group_alternation)
        .collect();
        format!("^{body}$")
    }

    /// The precompiled pattern for a scope and type class.
    #[must_use]
    pub fn pattern_for(&self, scope: VariableScope, type_class: TypeClass) -> &CompiledPattern {
        &self.resolved[slot(scope, type_class)]
    }
}

fn slot(scope: VariableScope, type_class: TypeClass) -> usize {
    let s = match scope {
        VariableScope::Global => 0,
        VariableScope::Static => 1,
        VariableScope::ClassMember => 2,
        VariableScope::Local => 3,
    };
    let t = match type_class {
        TypeClass::String => 0,
        TypeClass::Pointer => 1,
        TypeClass::Integer => 2,
        TypeClass::Bool => 3,
        TypeClass::Other => 4,
    };
    s * TypeClass::ALL.len() + t
}

fn group_alternation(fragment: &str) -> Cow<'_, str> {
    if fragment.contains('|') {
        Cow::Owned(format!("(?:{fragment})"))
    } else {
        Cow::Borrowed(fragment)
    }
}

fn strip_anchors(fragment: &str) -> &str {
    let fragment = fragment.strip_prefix('^').unwrap_or(fragment);
    if fragment.ends_with("\\$") {
        return fragment;
    }
    fragment.strip_suffix('$').unwrap_or(fragment)
}

// ────────────────────────────────────────────
// Style model
// ────────────────────────────────────────────

/// A rule attached to one category.
#[derive(Debug, Clone)]
pub enum StyleRule {
    /// A single pattern.
    Simple(CompiledPattern),
    /// The nested variable rule.
    Composite(CompositeRule),
}

/// The loaded naming convention.
///
/// Built once per run and shared read-only by every file analysis.
#[derive(Debug, Clone, Default)]
pub struct StyleModel {
    rules: BTreeMap<Category, StyleRule>,
}

impl StyleModel {
    /// Creates a model with no categories configured.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a model from already validated rules.
    #[must_use]
    pub fn new(rules: BTreeMap<Category, StyleRule>) -> Self {
        Self { rules }
    }

    /// Returns the rule for a category, if configured.
    #[must_use]
    pub fn rule(&self, category: Category) -> Option<&StyleRule> {
        self.rules.get(&category)
    }

    /// Iterates configured categories in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &StyleRule)> {
        self.rules.iter().map(|(c, r)| (*c, r))
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no category is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
