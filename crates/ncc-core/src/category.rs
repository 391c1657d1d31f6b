//! The fixed taxonomy of naming categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A naming-convention category.
///
/// The variant names double as the keys of a style document, so
/// `ClassName: '^[A-Z].*$'` configures [`Category::ClassName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// `class Foo`
    ClassName,
    /// `struct Foo`
    StructName,
    /// `union Foo`
    UnionName,
    /// `enum Foo`
    EnumName,
    /// Enumerators inside an enum body.
    EnumConstantName,
    /// `namespace foo`
    NamespaceName,
    /// `namespace foo = bar;`
    NamespaceAliasName,
    /// Free functions.
    FunctionName,
    /// Member functions, inline or defined out of line.
    MethodName,
    /// `typedef ... Foo;`
    TypedefName,
    /// `using Foo = ...;`
    TypeAliasName,
    /// `#define FOO`
    MacroName,
    /// Function and method parameters.
    ParameterName,
    /// Type, non-type and template template parameters.
    TemplateParameterName,
    /// Non-static variables at file or namespace scope.
    GlobalVariableName,
    /// Variables declared `static` outside a class body.
    StaticVariableName,
    /// Variables declared inside a function body.
    LocalVariableName,
    /// Data members of a class.
    ClassMemberVariable,
    /// Data members of a struct.
    StructMemberVariable,
    /// Data members of a union.
    UnionMemberVariable,
    /// Composite rule shared by every variable category.
    VariableName,
}

impl Category {
    /// Every category, in listing order.
    pub const ALL: [Self; 21] = [
        Self::ClassName,
        Self::StructName,
        Self::UnionName,
        Self::EnumName,
        Self::EnumConstantName,
        Self::NamespaceName,
        Self::NamespaceAliasName,
        Self::FunctionName,
        Self::MethodName,
        Self::TypedefName,
        Self::TypeAliasName,
        Self::MacroName,
        Self::ParameterName,
        Self::TemplateParameterName,
        Self::GlobalVariableName,
        Self::StaticVariableName,
        Self::LocalVariableName,
        Self::ClassMemberVariable,
        Self::StructMemberVariable,
        Self::UnionMemberVariable,
        Self::VariableName,
    ];

    /// Returns the key used for this category in style documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ClassName => "ClassName",
            Self::StructName => "StructName",
            Self::UnionName => "UnionName",
            Self::EnumName => "EnumName",
            Self::EnumConstantName => "EnumConstantName",
            Self::NamespaceName => "NamespaceName",
            Self::NamespaceAliasName => "NamespaceAliasName",
            Self::FunctionName => "FunctionName",
            Self::MethodName => "MethodName",
            Self::TypedefName => "TypedefName",
            Self::TypeAliasName => "TypeAliasName",
            Self::MacroName => "MacroName",
            Self::ParameterName => "ParameterName",
            Self::TemplateParameterName => "TemplateParameterName",
            Self::GlobalVariableName => "GlobalVariableName",
            Self::StaticVariableName => "StaticVariableName",
            Self::LocalVariableName => "LocalVariableName",
            Self::ClassMemberVariable => "ClassMemberVariable",
            Self::StructMemberVariable => "StructMemberVariable",
            Self::UnionMemberVariable => "UnionMemberVariable",
            Self::VariableName => "VariableName",
        }
    }

    /// Looks up a category by style-document key.
    ///
    /// Accepts the canonical names plus the legacy spellings used by older
    /// style files (`Namespace`, `CppMethod`, `TemplateTypeParameter`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(category) = Self::ALL.iter().copied().find(|c| c.name() == name) {
            return Some(category);
        }
        match name {
            "Namespace" => Some(Self::NamespaceName),
            "NamespaceAlias" => Some(Self::NamespaceAliasName),
            "CppMethod" => Some(Self::MethodName),
            "TemplateTypeParameter" | "TemplateNonTypeParameter" | "TemplateTemplateParameter" => {
                Some(Self::TemplateParameterName)
            }
            "GlobalVariable" => Some(Self::GlobalVariableName),
            "StaticVariable" => Some(Self::StaticVariableName),
            "LocalVariable" => Some(Self::LocalVariableName),
            _ => None,
        }
    }

    /// Returns the variable scope this category stands for, if it is one of
    /// the variable categories that fall back to [`Category::VariableName`].
    #[must_use]
    pub fn variable_scope(self) -> Option<VariableScope> {
        match self {
            Self::GlobalVariableName => Some(VariableScope::Global),
            Self::StaticVariableName => Some(VariableScope::Static),
            Self::LocalVariableName => Some(VariableScope::Local),
            Self::ClassMemberVariable | Self::StructMemberVariable | Self::UnionMemberVariable => {
                Some(VariableScope::ClassMember)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage scope of a variable, as used by `VariableName.ScopePrefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableScope {
    /// File or namespace scope, not `static`.
    Global,
    /// Declared `static` outside a class body.
    Static,
    /// Data member of a class, struct or union.
    ClassMember,
    /// Inside a function body.
    Local,
}

impl VariableScope {
    /// Every scope, in resolution-table order.
    pub const ALL: [Self; 4] = [Self::Global, Self::Static, Self::ClassMember, Self::Local];
}
