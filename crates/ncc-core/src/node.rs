//! Declaration nodes produced by a parser adapter.
//!
//! A [`DeclarationNode`] is a language-agnostic view of one named construct:
//! what it is, what it is called, where it is, and what encloses it.
//! Parser adapters build these; the classifier, resolver and validator only
//! read them.

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `namespace foo { ... }`
    Namespace,
    /// `namespace foo = bar;`
    NamespaceAlias,
    /// `class Foo`
    Class,
    /// `struct Foo`
    Struct,
    /// `union Foo`
    Union,
    /// `enum Foo` / `enum class Foo`
    Enum,
    /// An enumerator.
    EnumConstant,
    /// A function declaration or definition.
    Function,
    /// A member function recognised as such by the parser (e.g. `Foo::bar`).
    Method,
    /// A constructor.
    Constructor,
    /// A destructor.
    Destructor,
    /// An operator overload or conversion function.
    Operator,
    /// A function parameter.
    Parameter,
    /// A data member declared inside a class, struct or union body.
    Field,
    /// A variable declaration outside a record body.
    Variable,
    /// A preprocessor macro definition.
    Macro,
    /// `typedef ... Foo;`
    Typedef,
    /// `using Foo = ...;`
    TypeAlias,
    /// A template parameter of any flavour.
    TemplateParameter,
    /// A `goto` label.
    Label,
}

/// Kind of an enclosing declaration context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Namespace body.
    Namespace,
    /// Class body.
    Class,
    /// Struct body.
    Struct,
    /// Union body.
    Union,
    /// Enum body.
    Enum,
    /// Function body, including nested blocks.
    Function,
}

impl ScopeKind {
    /// Returns true for class, struct and union bodies.
    #[must_use]
    pub fn is_record(self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Union)
    }
}

/// One entry of the enclosing-context chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingScope {
    /// What kind of context this is.
    pub kind: ScopeKind,
    /// Its name; empty for anonymous contexts.
    pub name: String,
}

impl EnclosingScope {
    /// Creates a new scope entry.
    #[must_use]
    pub fn new(kind: ScopeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Storage class specifier of a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// No storage class specifier.
    #[default]
    None,
    /// `static`
    Static,
    /// `extern`
    Extern,
}

/// Best-effort classification of a variable's declared type.
///
/// Only used to pick a `VariableName.DataTypePrefix` fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeClass {
    /// `std::string`, `char *`, `char[]` and friends.
    String,
    /// Any other pointer.
    Pointer,
    /// Built-in and fixed-width integer types.
    Integer,
    /// `bool` / `_Bool`.
    #[serde(alias = "Boolean")]
    Bool,
    /// Everything else.
    #[default]
    Other,
}

const INTEGER_TYPES: &[&str] = &[
    "char",
    "short",
    "int",
    "long",
    "signed",
    "unsigned",
    "size_t",
    "ssize_t",
    "ptrdiff_t",
    "intptr_t",
    "uintptr_t",
    "intmax_t",
    "uintmax_t",
];

const CHAR_TYPES: &[&str] = &["char", "wchar_t", "char8_t", "char16_t", "char32_t"];

const STRING_TYPES: &[&str] = &[
    "string",
    "wstring",
    "u8string",
    "u16string",
    "u32string",
    "string_view",
    "wstring_view",
];

impl TypeClass {
    /// Every type class, in resolution-table order.
    pub const ALL: [Self; 5] = [
        Self::String,
        Self::Pointer,
        Self::Integer,
        Self::Bool,
        Self::Other,
    ];

    /// Infers a type class from the spelled type and its declarator shape.
    ///
    /// `type_name` is the type as written without the declarator, e.g.
    /// `"unsigned long"`, `"std::string"` or `"const char"`.
    #[must_use]
    pub fn infer(type_name: &str, pointer: bool, array: bool) -> Self {
        let words: Vec<&str> = type_name
            .split_whitespace()
            .filter(|w| !matches!(*w, "const" | "volatile" | "struct" | "enum" | "union"))
            .map(|w| w.split('<').next().unwrap_or(w))
            .map(|w| w.rsplit("::").next().unwrap_or(w))
            .collect();
        let base = words.last().copied().unwrap_or("");

        if STRING_TYPES.contains(&base) {
            return Self::String;
        }
        if (pointer || array) && words.iter().any(|w| CHAR_TYPES.contains(w)) {
            return Self::String;
        }
        if pointer {
            return Self::Pointer;
        }
        if base == "bool" || base == "_Bool" {
            return Self::Bool;
        }
        if words.iter().all(|w| INTEGER_TYPES.contains(w)) && !words.is_empty() {
            return Self::Integer;
        }
        if is_fixed_width_integer(base) {
            return Self::Integer;
        }
        Self::Other
    }
}

/// Matches `int8_t`, `uint_fast32_t`, `int_least16_t` and the like.
fn is_fixed_width_integer(name: &str) -> bool {
    let Some(rest) = name.strip_suffix("_t") else {
        return false;
    };
    let rest = rest.strip_prefix('u').unwrap_or(rest);
    let Some(rest) = rest.strip_prefix("int") else {
        return false;
    };
    let rest = rest
        .strip_prefix("_fast")
        .or_else(|| rest.strip_prefix("_least"))
        .unwrap_or(rest);
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

/// A named construct found while traversing a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    /// Syntactic kind.
    pub kind: NodeKind,
    /// The declared identifier; empty for anonymous declarations.
    pub spelling: String,
    /// Location of the identifier.
    pub location: Location,
    /// Enclosing contexts, outermost first.
    pub context: Vec<EnclosingScope>,
    /// Storage class specifier.
    pub storage: StorageClass,
    /// Inferred type class; meaningful for variables and fields.
    pub type_class: TypeClass,
}

impl DeclarationNode {
    /// Creates a node at file scope with no storage class.
    #[must_use]
    pub fn new(kind: NodeKind, spelling: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            location,
            context: Vec::new(),
            storage: StorageClass::None,
            type_class: TypeClass::Other,
        }
    }

    /// Sets the enclosing-context chain.
    #[must_use]
    pub fn with_context(mut self, context: Vec<EnclosingScope>) -> Self {
        self.context = context;
        self
    }

    /// Sets the storage class.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageClass) -> Self {
        self.storage = storage;
        self
    }

    /// Sets the inferred type class.
    #[must_use]
    pub fn with_type_class(mut self, type_class: TypeClass) -> Self {
        self.type_class = type_class;
        self
    }

    /// Returns the innermost enclosing context, if any.
    #[must_use]
    pub fn innermost_scope(&self) -> Option<&EnclosingScope> {
        self.context.last()
    }

    /// Returns true if any enclosing context is a function body.
    #[must_use]
    pub fn in_function(&self) -> bool {
        self.context.iter().any(|s| s.kind == ScopeKind::Function)
    }

    /// Returns true when the node has no usable identifier.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.spelling.trim().is_empty()
    }
}
