//! Maps declaration nodes to naming categories.

use crate::category::Category;
use crate::node::{DeclarationNode, NodeKind, ScopeKind, StorageClass};

/// Returns the category a declaration belongs to.
///
/// `None` means the node is never checked: anonymous declarations,
/// constructors, destructors, operators and labels.
#[must_use]
pub fn classify(node: &DeclarationNode) -> Option<Category> {
    if node.is_anonymous() {
        return None;
    }

    let category = match node.kind {
        NodeKind::Namespace => Category::NamespaceName,
        NodeKind::NamespaceAlias => Category::NamespaceAliasName,
        NodeKind::Class => Category::ClassName,
        NodeKind::Struct => Category::StructName,
        NodeKind::Union => Category::UnionName,
        NodeKind::Enum => Category::EnumName,
        NodeKind::EnumConstant => Category::EnumConstantName,
        NodeKind::Function => {
            if enclosing_record(node).is_some() {
                Category::MethodName
            } else {
                Category::FunctionName
            }
        }
        NodeKind::Method => Category::MethodName,
        NodeKind::Parameter => Category::ParameterName,
        NodeKind::Macro => Category::MacroName,
        NodeKind::Typedef => Category::TypedefName,
        NodeKind::TypeAlias => Category::TypeAliasName,
        NodeKind::TemplateParameter => Category::TemplateParameterName,
        NodeKind::Field => member_category(enclosing_record(node).unwrap_or(ScopeKind::Class)),
        NodeKind::Variable => variable_category(node),
        NodeKind::Constructor | NodeKind::Destructor | NodeKind::Operator | NodeKind::Label => {
            return None
        }
    };

    Some(category)
}

/// Kind of the innermost scope when it is a class, struct or union body.
fn enclosing_record(node: &DeclarationNode) -> Option<ScopeKind> {
    node.innermost_scope()
        .map(|s| s.kind)
        .filter(|k| k.is_record())
}

fn member_category(record: ScopeKind) -> Category {
    match record {
        ScopeKind::Struct => Category::StructMemberVariable,
        ScopeKind::Union => Category::UnionMemberVariable,
        _ => Category::ClassMemberVariable,
    }
}

fn variable_category(node: &DeclarationNode) -> Category {
    if let Some(record) = enclosing_record(node) {
        // `static int count;` inside a class body is still a member.
        return member_category(record);
    }
    if node.storage == StorageClass::Static {
        Category::StaticVariableName
    } else if node.in_function() {
        Category::LocalVariableName
    } else {
        Category::GlobalVariableName
    }
}
