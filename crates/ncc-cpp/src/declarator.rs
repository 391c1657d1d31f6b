//! Declarator unwrapping.
//!
//! C declarators nest the declared name inside pointer, array, function and
//! init wrappers. These helpers dig the name out and remember what the
//! wrappers said about its type.

use tree_sitter::Node;

/// What a declarator declares.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Declarator<'t> {
    /// Node holding the declared name (possibly qualified).
    pub name: Node<'t>,
    /// A pointer wrapper applies to the declared entity.
    pub pointer: bool,
    /// An array wrapper applies to the declared entity.
    pub array: bool,
    /// The outermost function declarator, when the entity is a function.
    pub function: Option<Node<'t>>,
}

impl Declarator<'_> {
    pub(crate) fn is_function(&self) -> bool {
        self.function.is_some()
    }
}

pub(crate) fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

/// Unwraps a declarator down to its name.
///
/// `int (*cb)(int)` is a pointer to function: reported as a pointer
/// variable, not as a function.
pub(crate) fn unwrap(node: Node<'_>) -> Option<Declarator<'_>> {
    let mut current = node;
    let mut pointer = false;
    let mut array = false;
    let mut function = None;
    let mut function_pointer = false;

    loop {
        match current.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "qualified_identifier"
            | "destructor_name" | "operator_name" | "operator_cast" | "template_function"
            | "namespace_identifier" => break,
            "pointer_declarator" => {
                if function.is_some() {
                    function_pointer = true;
                }
                pointer = true;
                current = current.child_by_field_name("declarator")?;
            }
            "reference_declarator" | "parenthesized_declarator" => {
                current = last_named_child(current)?;
            }
            "attributed_declarator" => {
                current = current.named_child(0)?;
            }
            "array_declarator" => {
                array = true;
                current = current.child_by_field_name("declarator")?;
            }
            "function_declarator" => {
                if function.is_none() {
                    function = Some(current);
                }
                current = current.child_by_field_name("declarator")?;
            }
            "init_declarator" => {
                current = current.child_by_field_name("declarator")?;
            }
            _ => return None,
        }
    }

    if function_pointer {
        function = None;
    }

    Some(Declarator {
        name: current,
        pointer,
        array,
        function,
    })
}

/// Splits a possibly qualified name into its last scope segment and the
/// final name node: `ns::A::f` yields (`A`, `f`).
pub(crate) fn split_qualified<'t>(node: Node<'t>, src: &[u8]) -> (Option<String>, Node<'t>) {
    let mut scope = None;
    let mut current = node;

    loop {
        match current.kind() {
            "qualified_identifier" => {
                if let Some(s) = current.child_by_field_name("scope") {
                    scope = Some(scope_name(s, src));
                }
                match current.child_by_field_name("name") {
                    Some(name) => current = name,
                    None => break,
                }
            }
            "template_function" | "template_type" => match current.child_by_field_name("name") {
                Some(name) => current = name,
                None => break,
            },
            _ => break,
        }
    }

    (scope, current)
}

fn scope_name(node: Node<'_>, src: &[u8]) -> String {
    match node.kind() {
        "template_type" => node
            .child_by_field_name("name")
            .map_or_else(|| text(&node, src).to_owned(), |n| text(&n, src).to_owned()),
        _ => text(&node, src).to_owned(),
    }
}

fn last_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let last = node.named_children(&mut cursor).last();
    last
}
