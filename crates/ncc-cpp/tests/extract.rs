//! Integration test: C/C++ source → declarations → categories.

use ncc_core::{
    check_node, classify, Category, DeclarationNode, NodeKind, ScopeKind, StorageClass,
    StyleFormat, StyleModel, TypeClass,
};
use ncc_cpp::{CppParser, Dialect};
use std::path::Path;

fn parse(src: &str) -> Vec<DeclarationNode> {
    parse_as(src, Dialect::Cpp)
}

fn parse_as(src: &str, dialect: Dialect) -> Vec<DeclarationNode> {
    CppParser::new()
        .parse_source(Path::new("test.cpp"), src.as_bytes(), dialect)
        .expect("fixture should parse")
        .into_declarations()
        .collect()
}

fn find<'a>(decls: &'a [DeclarationNode], name: &str) -> &'a DeclarationNode {
    decls
        .iter()
        .find(|d| d.spelling == name)
        .unwrap_or_else(|| panic!("no declaration named {name}: {decls:#?}"))
}

fn category_of(decls: &[DeclarationNode], name: &str) -> Option<Category> {
    classify(find(decls, name))
}

// ── Locations ──

#[test]
fn class_location_is_identifier_position() {
    let src = "\n".repeat(15) + "class B {};\n";
    let decls = parse(&src);
    let b = find(&decls, "B");
    assert_eq!(b.kind, NodeKind::Class);
    assert_eq!((b.location.line, b.location.column), (16, 7));
}

#[test]
fn member_location_is_identifier_position() {
    let src = "class A {\n  public:\n    int b;\n};\n";
    let decls = parse(src);
    let b = find(&decls, "b");
    assert_eq!((b.location.line, b.location.column), (3, 9));
    assert_eq!(classify(b), Some(Category::ClassMemberVariable));
}

// ── Records and namespaces ──

#[test]
fn records_enums_and_namespaces() {
    let src = r"
namespace geo {
namespace ga = geo;
struct Point { int x; };
union Value { int i; float f; };
enum Color { Red, Green };
enum class Mode : int { Fast };
}
";
    let decls = parse(src);
    assert_eq!(category_of(&decls, "geo"), Some(Category::NamespaceName));
    assert_eq!(category_of(&decls, "ga"), Some(Category::NamespaceAliasName));
    assert_eq!(category_of(&decls, "Point"), Some(Category::StructName));
    assert_eq!(category_of(&decls, "x"), Some(Category::StructMemberVariable));
    assert_eq!(category_of(&decls, "Value"), Some(Category::UnionName));
    assert_eq!(category_of(&decls, "f"), Some(Category::UnionMemberVariable));
    assert_eq!(category_of(&decls, "Color"), Some(Category::EnumName));
    assert_eq!(category_of(&decls, "Green"), Some(Category::EnumConstantName));
    assert_eq!(category_of(&decls, "Fast"), Some(Category::EnumConstantName));

    let point = find(&decls, "Point");
    assert_eq!(point.context.len(), 1);
    assert_eq!(point.context[0].kind, ScopeKind::Namespace);
}

#[test]
fn nested_namespace_opens_every_level() {
    let decls = parse("namespace a::b { int v; }\n");
    assert_eq!(category_of(&decls, "a"), Some(Category::NamespaceName));
    assert_eq!(category_of(&decls, "b"), Some(Category::NamespaceName));
    assert_eq!(find(&decls, "v").context.len(), 2);
    assert_eq!(category_of(&decls, "v"), Some(Category::GlobalVariableName));
}

#[test]
fn typedef_tag_is_not_reported_but_members_are() {
    let src = "typedef struct tag_s { int count; } Counter;\n";
    let decls = parse_as(src, Dialect::C);
    assert!(decls.iter().all(|d| d.spelling != "tag_s"), "{decls:#?}");
    assert_eq!(category_of(&decls, "Counter"), Some(Category::TypedefName));
    assert_eq!(category_of(&decls, "count"), Some(Category::StructMemberVariable));
}

#[test]
fn forward_declarations_are_not_reported() {
    let decls = parse("class Later;\nstruct Later2 *p;\n");
    assert!(decls.iter().all(|d| d.spelling != "Later" && d.spelling != "Later2"));
    assert_eq!(category_of(&decls, "p"), Some(Category::GlobalVariableName));
}

// ── Functions ──

#[test]
fn functions_methods_and_special_members() {
    let src = r"
class Widget {
public:
    Widget();
    ~Widget();
    void draw(int times);
    bool operator==(const Widget& other) const;
    int size() const { return 0; }
};

Widget::Widget() {}
Widget::~Widget() {}
void Widget::draw(int times) {}
int free_fn(int arg) { return arg; }
";
    let decls = parse(src);

    let kinds: Vec<(NodeKind, &str)> = decls
        .iter()
        .filter(|d| {
            matches!(
                d.kind,
                NodeKind::Constructor | NodeKind::Destructor | NodeKind::Operator
            )
        })
        .map(|d| (d.kind, d.spelling.as_str()))
        .collect();
    assert!(kinds.contains(&(NodeKind::Constructor, "Widget")), "{kinds:?}");
    assert!(kinds.iter().any(|(k, _)| *k == NodeKind::Destructor), "{kinds:?}");
    assert!(kinds.iter().any(|(k, _)| *k == NodeKind::Operator), "{kinds:?}");

    let methods: Vec<&str> = decls
        .iter()
        .filter(|d| classify(d) == Some(Category::MethodName))
        .map(|d| d.spelling.as_str())
        .collect();
    assert_eq!(methods, ["draw", "size", "draw"]);

    assert_eq!(category_of(&decls, "free_fn"), Some(Category::FunctionName));
    assert_eq!(category_of(&decls, "arg"), Some(Category::ParameterName));
    assert_eq!(category_of(&decls, "times"), Some(Category::ParameterName));
}

#[test]
fn function_name_is_bare_identifier() {
    let decls = parse("int main(int argc, const char** argv) { return 0; }\n");
    let main = find(&decls, "main");
    assert_eq!(main.spelling, "main");
    assert_eq!(classify(main), Some(Category::FunctionName));
    assert_eq!(find(&decls, "argc").type_class, TypeClass::Integer);
}

#[test]
fn namespace_qualified_definition_is_function() {
    let decls = parse("namespace util { void helper(); }\nvoid util::helper() {}\n");
    let helpers: Vec<_> = decls.iter().filter(|d| d.spelling == "helper").collect();
    assert_eq!(helpers.len(), 2);
    assert!(helpers
        .iter()
        .all(|d| classify(d) == Some(Category::FunctionName)));
}

// ── Variables ──

#[test]
fn variable_scopes_and_storage() {
    let src = r"
int g_count = 0;
static int s_total;
extern int e_shared;

void run(int n) {
    int local = 1;
    static int calls = 0;
    for (int i = 0; i < n; ++i) {}
    int values[3] = {1, 2, 3};
    for (int v : values) {}
}
";
    let decls = parse(src);
    assert_eq!(category_of(&decls, "g_count"), Some(Category::GlobalVariableName));
    assert_eq!(category_of(&decls, "s_total"), Some(Category::StaticVariableName));
    assert_eq!(find(&decls, "e_shared").storage, StorageClass::Extern);
    assert_eq!(category_of(&decls, "e_shared"), Some(Category::GlobalVariableName));
    assert_eq!(category_of(&decls, "local"), Some(Category::LocalVariableName));
    assert_eq!(category_of(&decls, "calls"), Some(Category::StaticVariableName));
    assert_eq!(category_of(&decls, "i"), Some(Category::LocalVariableName));
    assert_eq!(category_of(&decls, "v"), Some(Category::LocalVariableName));
    assert_eq!(category_of(&decls, "n"), Some(Category::ParameterName));
}

#[test]
fn out_of_line_static_member_keeps_record_scope() {
    let src = r"
class Foo { static int m_count; };
int Foo::m_count = 0;
struct Bar { static int total; };
int Bar::total = 1;
namespace cfg { extern int level; }
int cfg::level = 2;
";
    let decls = parse(src);
    let counts: Vec<(Option<Category>, usize)> = decls
        .iter()
        .filter(|d| d.spelling == "m_count")
        .map(|d| (classify(d), d.location.line))
        .collect();
    assert_eq!(
        counts,
        [
            (Some(Category::ClassMemberVariable), 2),
            (Some(Category::ClassMemberVariable), 3)
        ]
    );

    let totals: Vec<_> = decls.iter().filter(|d| d.spelling == "total").collect();
    assert_eq!(totals.len(), 2);
    assert!(totals
        .iter()
        .all(|d| classify(d) == Some(Category::StructMemberVariable)));

    let levels: Vec<_> = decls.iter().filter(|d| d.spelling == "level").collect();
    assert_eq!(levels.len(), 2);
    assert!(levels
        .iter()
        .all(|d| classify(d) == Some(Category::GlobalVariableName)));
}

#[test]
fn out_of_line_member_definition_uses_member_prefix() {
    let style = StyleModel::parse(
        "VariableName:\n  ScopePrefix:\n    Global: 'g_'\n    ClassMember: 'm_'\n  Pattern: '^[a-z]+$'\n",
        StyleFormat::Yaml,
    )
    .unwrap();
    let src = "class Foo { static int m_count; };\nint Foo::m_count = 0;\n";

    let violations: Vec<_> = parse(src)
        .iter()
        .filter_map(|d| check_node(d, &style))
        .collect();
    assert!(violations.is_empty(), "{violations:#?}");
}

#[test]
fn catch_parameter_is_local_variable() {
    let src = "void run() {\n    try { work(); } catch (const int& e) { int handled = e; }\n}\n";
    let decls = parse(src);
    let e = find(&decls, "e");
    assert_eq!(e.kind, NodeKind::Variable);
    assert_eq!(classify(e), Some(Category::LocalVariableName));
    assert_eq!(category_of(&decls, "handled"), Some(Category::LocalVariableName));
}

#[test]
fn member_initializer_lambda_locals_are_found() {
    let src = "class A {\n    int a = [] { int inner = 1; return inner; }();\n};\n";
    let decls = parse(src);
    assert_eq!(category_of(&decls, "a"), Some(Category::ClassMemberVariable));
    assert_eq!(category_of(&decls, "inner"), Some(Category::LocalVariableName));
}

#[test]
fn type_classes_are_inferred() {
    let src = r#"
#include <string>
std::string name;
const char* label = "x";
char buffer[16];
int* cursor;
bool ready;
unsigned long count;
double ratio;
"#;
    let decls = parse(src);
    assert_eq!(find(&decls, "name").type_class, TypeClass::String);
    assert_eq!(find(&decls, "label").type_class, TypeClass::String);
    assert_eq!(find(&decls, "buffer").type_class, TypeClass::String);
    assert_eq!(find(&decls, "cursor").type_class, TypeClass::Pointer);
    assert_eq!(find(&decls, "ready").type_class, TypeClass::Bool);
    assert_eq!(find(&decls, "count").type_class, TypeClass::Integer);
    assert_eq!(find(&decls, "ratio").type_class, TypeClass::Other);
}

#[test]
fn function_pointer_is_a_variable() {
    let decls = parse("int (*callback)(int);\n");
    let cb = find(&decls, "callback");
    assert_eq!(cb.kind, NodeKind::Variable);
    assert_eq!(cb.type_class, TypeClass::Pointer);
}

// ── Other kinds ──

#[test]
fn macros_typedefs_aliases_templates_labels() {
    let src = r"
#define MAX_SIZE 10
#define square(x) ((x) * (x))
typedef unsigned int uint_t;
using Handle = int;
template <typename T, int N>
T first(T value) { return value; }
void jump() {
done:
    return;
}
";
    let decls = parse(src);
    assert_eq!(category_of(&decls, "MAX_SIZE"), Some(Category::MacroName));
    assert_eq!(category_of(&decls, "square"), Some(Category::MacroName));
    assert_eq!(category_of(&decls, "uint_t"), Some(Category::TypedefName));
    assert_eq!(category_of(&decls, "Handle"), Some(Category::TypeAliasName));
    assert_eq!(category_of(&decls, "T"), Some(Category::TemplateParameterName));
    assert_eq!(category_of(&decls, "N"), Some(Category::TemplateParameterName));
    assert_eq!(category_of(&decls, "first"), Some(Category::FunctionName));
    assert_eq!(find(&decls, "done").kind, NodeKind::Label);
    assert_eq!(category_of(&decls, "done"), None);
}

#[test]
fn extern_c_block_is_transparent() {
    let decls = parse("extern \"C\" {\nint c_api(void);\n}\n");
    assert_eq!(category_of(&decls, "c_api"), Some(Category::FunctionName));
}

// ── End to end with a style ──

#[test]
fn member_prefix_rule_against_real_source() {
    let style = StyleModel::parse(
        "ClassName: '^C.*$'\nVariableName:\n  ScopePrefix:\n    ClassMember: 'm_'\n  Pattern: '^.*$'\n",
        StyleFormat::Yaml,
    )
    .unwrap();
    let src = "class CShape {\n    int m_sides;\n    int area;\n};\n";

    let violations: Vec<_> = parse(src)
        .iter()
        .filter_map(|d| check_node(d, &style))
        .collect();
    assert_eq!(violations.len(), 1, "{violations:#?}");
    assert_eq!(violations[0].spelling, "area");
    assert_eq!(violations[0].pattern, "^m_.*$");
    assert_eq!(
        (violations[0].location.line, violations[0].location.column),
        (3, 9)
    );
}

#[test]
fn reads_files_through_adapter() {
    use ncc_core::ParserAdapter;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.c");
    std::fs::write(&path, "struct node { struct node *next; };\n").unwrap();

    let decls: Vec<_> = CppParser::new()
        .parse(&path, &["-x".to_string(), "c".to_string()])
        .unwrap()
        .into_declarations()
        .collect();
    let next = find(&decls, "next");
    assert_eq!(next.type_class, TypeClass::Pointer);
    assert_eq!(next.location.file, path);
}
