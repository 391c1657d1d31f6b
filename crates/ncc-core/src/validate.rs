//! Matches a declaration's spelling against its resolved pattern.

use crate::node::DeclarationNode;
use crate::resolve::ResolvedPattern;
use crate::types::Violation;

/// Returns a violation when the spelling does not fully match.
#[must_use]
pub fn validate(node: &DeclarationNode, resolved: &ResolvedPattern<'_>) -> Option<Violation> {
    if resolved.pattern.is_match(&node.spelling) {
        return None;
    }
    Some(Violation::new(
        resolved.category,
        node.spelling.clone(),
        resolved.pattern.as_str(),
        node.location.clone(),
    ))
}

/// Classifies, resolves and validates one declaration.
#[must_use]
pub fn check_node(node: &DeclarationNode, model: &crate::style::StyleModel) -> Option<Violation> {
    let category = crate::classify::classify(node)?;
    let resolved = crate::resolve::resolve(category, node, model)?;
    validate(node, &resolved)
}
