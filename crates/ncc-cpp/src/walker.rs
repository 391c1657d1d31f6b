//! Syntax tree → declaration nodes.

use crate::declarator::{self, split_qualified, text, Declarator};
use ncc_core::{
    DeclarationNode, EnclosingScope, Location, NodeKind, ScopeKind, StorageClass, TypeClass,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tree_sitter::Node;

/// Leaf-ish node kinds that never contain declarations.
const OPAQUE: &[&str] = &[
    "comment",
    "string_literal",
    "raw_string_literal",
    "concatenated_string",
    "char_literal",
    "number_literal",
    "preproc_include",
    "preproc_call",
    "binary_expression",
    "friend_declaration",
    "ERROR",
];

/// Collects the declarations of a parsed file in source order.
///
/// `ERROR` subtrees are skipped, so a tolerant caller still gets every
/// declaration outside the broken regions.
#[must_use]
pub fn extract_declarations(root: Node<'_>, src: &[u8], path: &Path) -> Vec<DeclarationNode> {
    let mut walker = Walker {
        src,
        path,
        scopes: Vec::new(),
        namespaces: HashSet::new(),
        records: HashMap::new(),
        out: Vec::new(),
    };
    walker.walk(root);
    walker.out
}

struct Walker<'a> {
    src: &'a [u8],
    path: &'a Path,
    scopes: Vec<EnclosingScope>,
    /// Namespace names seen so far, to tell `ns::f()` from `Class::f()`.
    namespaces: HashSet<String>,
    /// Record names seen so far with their kind, for `int Foo::count = 0;`.
    records: HashMap<String, ScopeKind>,
    out: Vec<DeclarationNode>,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node<'_>) {
        match node.kind() {
            kind if OPAQUE.contains(&kind) => {}
            "namespace_definition" => self.namespace(node),
            "namespace_alias_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.emit(NodeKind::NamespaceAlias, name);
                }
            }
            "class_specifier" | "struct_specifier" | "union_specifier" | "enum_specifier" => {
                self.type_specifier(node, true);
            }
            "function_definition" => self.function_definition(node),
            "declaration" => self.declaration(node, false),
            "field_declaration" => self.declaration(node, true),
            "type_definition" => self.type_definition(node),
            "alias_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.emit(NodeKind::TypeAlias, name);
                }
            }
            "template_declaration" => self.template(node),
            "preproc_def" | "preproc_function_def" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.emit(NodeKind::Macro, name);
                }
            }
            "labeled_statement" => {
                if let Some(label) = node.child_by_field_name("label") {
                    self.emit(NodeKind::Label, label);
                }
                self.walk_children(node);
            }
            "for_range_loop" => self.range_for(node),
            "lambda_expression" => {
                self.scopes.push(EnclosingScope::new(ScopeKind::Function, ""));
                self.walk_children(node);
                self.scopes.pop();
            }
            "catch_clause" => self.catch_clause(node),
            "parameter_declaration" | "optional_parameter_declaration" => {
                self.parameter(node, NodeKind::Parameter);
            }
            _ => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            self.walk(child);
        }
    }

    fn emit(&mut self, kind: NodeKind, name: Node<'_>) {
        self.emit_with(kind, name, StorageClass::None, TypeClass::Other);
    }

    fn emit_with(
        &mut self,
        kind: NodeKind,
        name: Node<'_>,
        storage: StorageClass,
        type_class: TypeClass,
    ) {
        let (_, name) = split_qualified(name, self.src);
        let spelling = text(&name, self.src);
        if spelling.is_empty() {
            return;
        }
        let pos = name.start_position();
        let node = DeclarationNode::new(
            kind,
            spelling,
            Location::new(self.path, pos.row + 1, pos.column + 1),
        )
        .with_context(self.scopes.clone())
        .with_storage(storage)
        .with_type_class(type_class);
        self.out.push(node);
    }

    // ── Scopes ──

    fn namespace(&mut self, node: Node<'_>) {
        let mut pushed = 0;
        match node.child_by_field_name("name") {
            Some(name) if name.kind() == "nested_namespace_specifier" => {
                // `namespace a::b { ... }` opens each level in turn.
                let mut cursor = name.walk();
                let parts: Vec<_> = name
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() == "namespace_identifier")
                    .collect();
                for part in parts {
                    self.open_namespace(part);
                    pushed += 1;
                }
            }
            Some(name) => {
                self.open_namespace(name);
                pushed += 1;
            }
            None => {
                self.scopes.push(EnclosingScope::new(ScopeKind::Namespace, ""));
                pushed += 1;
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body);
        }
        for _ in 0..pushed {
            self.scopes.pop();
        }
    }

    fn open_namespace(&mut self, name: Node<'_>) {
        let spelling = text(&name, self.src).to_owned();
        self.emit(NodeKind::Namespace, name);
        self.namespaces.insert(spelling.clone());
        self.scopes.push(EnclosingScope::new(ScopeKind::Namespace, spelling));
    }

    /// Class, struct, union or enum. Bodiless uses (`struct S s;`, forward
    /// declarations) are not declarations of their own.
    fn type_specifier(&mut self, node: Node<'_>, report_name: bool) {
        let (kind, scope) = match node.kind() {
            "class_specifier" => (NodeKind::Class, ScopeKind::Class),
            "struct_specifier" => (NodeKind::Struct, ScopeKind::Struct),
            "union_specifier" => (NodeKind::Union, ScopeKind::Union),
            "enum_specifier" => (NodeKind::Enum, ScopeKind::Enum),
            _ => return,
        };
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };

        let name = node.child_by_field_name("name");
        let spelling = name
            .map(|n| text(&split_qualified(n, self.src).1, self.src).to_owned())
            .unwrap_or_default();
        if let (Some(name), true) = (name, report_name) {
            self.emit(kind, name);
        }
        if scope.is_record() && !spelling.is_empty() {
            self.records.insert(spelling.clone(), scope);
        }

        self.scopes.push(EnclosingScope::new(scope, spelling));
        if kind == NodeKind::Enum {
            let mut cursor = body.walk();
            let enumerators: Vec<_> = body
                .named_children(&mut cursor)
                .filter(|n| n.kind() == "enumerator")
                .collect();
            for enumerator in enumerators {
                if let Some(name) = enumerator.child_by_field_name("name") {
                    self.emit(NodeKind::EnumConstant, name);
                }
            }
        } else {
            self.walk_children(body);
        }
        self.scopes.pop();
    }

    fn template(&mut self, node: Node<'_>) {
        let params = node.child_by_field_name("parameters");
        if let Some(params) = params {
            self.template_parameters(params);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| Some(*c) != params)
            .collect();
        for child in children {
            self.walk(child);
        }
    }

    fn template_parameters(&mut self, list: Node<'_>) {
        let mut cursor = list.walk();
        let params: Vec<_> = list.named_children(&mut cursor).collect();
        for param in params {
            match param.kind() {
                "type_parameter_declaration" | "variadic_type_parameter_declaration" => {
                    if let Some(name) = child_of_kind(param, "type_identifier") {
                        self.emit(NodeKind::TemplateParameter, name);
                    }
                }
                "optional_type_parameter_declaration" => {
                    if let Some(name) = param.child_by_field_name("name") {
                        self.emit(NodeKind::TemplateParameter, name);
                    }
                }
                "template_template_parameter_declaration" => {
                    let inner = [
                        "type_parameter_declaration",
                        "variadic_type_parameter_declaration",
                    ]
                    .iter()
                    .find_map(|kind| child_of_kind(param, kind));
                    if let Some(name) = inner.and_then(|i| child_of_kind(i, "type_identifier")) {
                        self.emit(NodeKind::TemplateParameter, name);
                    } else if let Some(name) = child_of_kind(param, "optional_type_parameter_declaration")
                        .and_then(|i| i.child_by_field_name("name"))
                    {
                        self.emit(NodeKind::TemplateParameter, name);
                    }
                }
                "parameter_declaration"
                | "optional_parameter_declaration"
                | "variadic_parameter_declaration" => {
                    self.parameter(param, NodeKind::TemplateParameter);
                }
                _ => {}
            }
        }
    }

    // ── Functions ──

    fn function_definition(&mut self, node: Node<'_>) {
        let Some(decl) = node
            .child_by_field_name("declarator")
            .and_then(declarator::unwrap)
        else {
            return;
        };

        let name = self.function_name(&decl);
        self.emit(self.function_kind(&decl), decl.name);

        self.scopes.push(EnclosingScope::new(ScopeKind::Function, name));
        if let Some(function) = decl.function {
            self.parameters(function);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.walk(body);
        }
        self.scopes.pop();
    }

    fn function_name(&self, decl: &Declarator<'_>) -> String {
        let (_, name) = split_qualified(decl.name, self.src);
        text(&name, self.src).to_owned()
    }

    fn function_kind(&self, decl: &Declarator<'_>) -> NodeKind {
        if decl.name.kind() == "operator_cast" {
            return NodeKind::Operator;
        }
        let (scope, name) = split_qualified(decl.name, self.src);
        match name.kind() {
            "destructor_name" => return NodeKind::Destructor,
            "operator_name" | "operator_cast" => return NodeKind::Operator,
            _ => {}
        }
        let spelling = text(&name, self.src);

        match scope {
            Some(scope) if scope == spelling => NodeKind::Constructor,
            Some(scope) if self.namespaces.contains(&scope) || scope.is_empty() => {
                NodeKind::Function
            }
            Some(_) => NodeKind::Method,
            None => match self.scopes.last() {
                Some(s) if s.kind.is_record() && s.name == spelling => NodeKind::Constructor,
                _ => NodeKind::Function,
            },
        }
    }

    fn parameters(&mut self, function: Node<'_>) {
        let Some(list) = function.child_by_field_name("parameters") else {
            return;
        };
        let mut cursor = list.walk();
        let params: Vec<_> = list.named_children(&mut cursor).collect();
        for param in params {
            if matches!(
                param.kind(),
                "parameter_declaration"
                    | "optional_parameter_declaration"
                    | "variadic_parameter_declaration"
            ) {
                self.parameter(param, NodeKind::Parameter);
            }
        }
    }

    fn parameter(&mut self, node: Node<'_>, kind: NodeKind) {
        let Some(decl) = node
            .child_by_field_name("declarator")
            .and_then(declarator::unwrap)
        else {
            return;
        };
        let type_class = self.type_class(node, &decl);
        self.emit_with(kind, decl.name, StorageClass::None, type_class);
    }

    // ── Declarations ──

    fn declaration(&mut self, node: Node<'_>, field: bool) {
        if let Some(ty) = node.child_by_field_name("type") {
            self.type_specifier(ty, true);
        }
        let storage = storage_class(node, self.src);

        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();

        for raw in declarators {
            let Some(decl) = declarator::unwrap(raw) else {
                continue;
            };

            if let Some(function) = decl.function {
                self.emit_with(self.function_kind(&decl), decl.name, storage, TypeClass::Other);
                let name = self.function_name(&decl);
                self.scopes.push(EnclosingScope::new(ScopeKind::Function, name));
                self.parameters(function);
                self.scopes.pop();
                continue;
            }

            let kind = if field { NodeKind::Field } else { NodeKind::Variable };
            let type_class = self.type_class(node, &decl);
            match self.member_definition_scope(&decl) {
                Some(record) => {
                    self.scopes.push(record);
                    self.emit_with(kind, decl.name, storage, type_class);
                    self.scopes.pop();
                }
                None => self.emit_with(kind, decl.name, storage, type_class),
            }

            // Initializers may hold lambdas with their own locals.
            if raw.kind() == "init_declarator" {
                if let Some(value) = raw.child_by_field_name("value") {
                    self.walk(value);
                }
            }
        }

        // In-class member initializers: `int a = [] { ... }();`
        let mut cursor = node.walk();
        let defaults: Vec<_> = node
            .children_by_field_name("default_value", &mut cursor)
            .collect();
        for value in defaults {
            self.walk(value);
        }
    }

    /// Record scope of an out-of-line static member definition such as
    /// `int Foo::count = 0;`. Namespace-qualified variables keep file scope.
    fn member_definition_scope(&self, decl: &Declarator<'_>) -> Option<EnclosingScope> {
        let (scope, _) = split_qualified(decl.name, self.src);
        let scope = scope.filter(|s| !s.is_empty() && !self.namespaces.contains(s))?;
        let kind = self.records.get(&scope).copied().unwrap_or(ScopeKind::Class);
        Some(EnclosingScope::new(kind, scope))
    }

    /// `catch (const Error& e)` declares a local, not a parameter.
    fn catch_clause(&mut self, node: Node<'_>) {
        if let Some(list) = node.child_by_field_name("parameters") {
            let mut cursor = list.walk();
            let params: Vec<_> = list
                .named_children(&mut cursor)
                .filter(|p| p.kind() == "parameter_declaration")
                .collect();
            for param in params {
                self.parameter(param, NodeKind::Variable);
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.walk(body);
        }
    }

    fn type_definition(&mut self, node: Node<'_>) {
        if let Some(ty) = node.child_by_field_name("type") {
            // The tag of `typedef struct tag { ... } name;` is not reported.
            self.type_specifier(ty, false);
        }
        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for raw in declarators {
            if let Some(decl) = declarator::unwrap(raw) {
                self.emit(NodeKind::Typedef, decl.name);
            }
        }
    }

    fn range_for(&mut self, node: Node<'_>) {
        if let Some(decl) = node
            .child_by_field_name("declarator")
            .and_then(declarator::unwrap)
        {
            let type_class = self.type_class(node, &decl);
            self.emit_with(NodeKind::Variable, decl.name, StorageClass::None, type_class);
        }
        for field in ["right", "body"] {
            if let Some(child) = node.child_by_field_name(field) {
                self.walk(child);
            }
        }
    }

    fn type_class(&self, owner: Node<'_>, decl: &Declarator<'_>) -> TypeClass {
        let type_name = owner
            .child_by_field_name("type")
            .map(|ty| match ty.child_by_field_name("body") {
                // Inline definition: classify by tag name, not the whole body.
                Some(_) => ty
                    .child_by_field_name("name")
                    .map_or(String::new(), |n| text(&n, self.src).to_owned()),
                None => text(&ty, self.src).to_owned(),
            })
            .unwrap_or_default();
        TypeClass::infer(&type_name, decl.pointer, decl.array)
    }
}

fn storage_class(node: Node<'_>, src: &[u8]) -> StorageClass {
    let mut cursor = node.walk();
    let storage = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "storage_class_specifier")
        .find_map(|c| match text(&c, src) {
            "static" => Some(StorageClass::Static),
            "extern" => Some(StorageClass::Extern),
            _ => None,
        })
        .unwrap_or_default();
    storage
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}
