//! Picks the pattern that applies to a classified declaration.

use crate::category::{Category, VariableScope};
use crate::node::DeclarationNode;
use crate::style::{CompiledPattern, StyleModel, StyleRule};

/// The pattern chosen for one declaration, and the category it came from.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPattern<'a> {
    /// Category reported on a mismatch.
    pub category: Category,
    /// Pattern to match the spelling against.
    pub pattern: &'a CompiledPattern,
}

/// Resolves the pattern for `category`.
///
/// A category with its own rule uses it. Variable categories without one
/// fall back to the `VariableName` composite for their scope and the node's
/// type class; the mismatch is then reported under `VariableName`.
/// Returns `None` when nothing applies.
#[must_use]
pub fn resolve<'a>(
    category: Category,
    node: &DeclarationNode,
    model: &'a StyleModel,
) -> Option<ResolvedPattern<'a>> {
    match model.rule(category) {
        Some(StyleRule::Simple(pattern)) => {
            return Some(ResolvedPattern { category, pattern });
        }
        Some(StyleRule::Composite(rule)) => {
            // Only `VariableName` carries a composite; no node classifies into it.
            let scope = category.variable_scope().unwrap_or(VariableScope::Global);
            return Some(ResolvedPattern {
                category,
                pattern: rule.pattern_for(scope, node.type_class),
            });
        }
        None => {}
    }

    let scope = category.variable_scope()?;
    match model.rule(Category::VariableName)? {
        StyleRule::Composite(rule) => Some(ResolvedPattern {
            category: Category::VariableName,
            pattern: rule.pattern_for(scope, node.type_class),
        }),
        StyleRule::Simple(pattern) => Some(ResolvedPattern {
            category: Category::VariableName,
            pattern,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, TypeClass};
    use crate::style::StyleFormat;
    use crate::types::Location;

    fn model(yaml: &str) -> StyleModel {
        StyleModel::parse(yaml, StyleFormat::Yaml).unwrap()
    }

    fn var(type_class: TypeClass) -> DeclarationNode {
        DeclarationNode::new(NodeKind::Variable, "v", Location::new("t.c", 1, 1))
            .with_type_class(type_class)
    }

    #[test]
    fn simple_rule_is_used_directly() {
        let m = model("ClassName: '^C.*$'\n");
        let r = resolve(Category::ClassName, &var(TypeClass::Other), &m).unwrap();
        assert_eq!(r.category, Category::ClassName);
        assert_eq!(r.pattern.as_str(), "^C.*$");
    }

    #[test]
    fn unconfigured_category_resolves_to_nothing() {
        let m = model("ClassName: '^C.*$'\n");
        assert!(resolve(Category::StructName, &var(TypeClass::Other), &m).is_none());
        assert!(resolve(Category::LocalVariableName, &var(TypeClass::Other), &m).is_none());
    }

    #[test]
    fn variable_categories_fall_back_to_composite() {
        let m = model(
            "VariableName:\n  ScopePrefix:\n    Global: 'g_'\n  DataTypePrefix:\n    Integer: 'n'\n  Pattern: '^[A-Z].*$'\n",
        );
        let r = resolve(
            Category::GlobalVariableName,
            &var(TypeClass::Integer),
            &m,
        )
        .unwrap();
        assert_eq!(r.category, Category::VariableName);
        assert_eq!(r.pattern.as_str(), "^g_n[A-Z].*$");

        let r = resolve(Category::LocalVariableName, &var(TypeClass::Bool), &m).unwrap();
        assert_eq!(r.pattern.as_str(), "^[A-Z].*$");
    }

    #[test]
    fn specific_variable_rule_wins_over_composite() {
        let m = model(
            "LocalVariableName: '^[a-z]+$'\nVariableName:\n  Pattern: '^[A-Z].*$'\n",
        );
        let r = resolve(Category::LocalVariableName, &var(TypeClass::Other), &m).unwrap();
        assert_eq!(r.category, Category::LocalVariableName);
        assert_eq!(r.pattern.as_str(), "^[a-z]+$");

        let r = resolve(Category::GlobalVariableName, &var(TypeClass::Other), &m).unwrap();
        assert_eq!(r.category, Category::VariableName);
    }

    #[test]
    fn non_variable_categories_never_fall_back() {
        let m = model("VariableName:\n  Pattern: '^[A-Z].*$'\n");
        assert!(resolve(Category::ParameterName, &var(TypeClass::Other), &m).is_none());
    }
}
