/// 解析集成测试
///
/// 覆盖 grammar.js 中每条规则的合法输入，以及若干应当报错的输入。
use rstest::rstest;
use std::path::{Path, PathBuf};
use tree_sitter_hades::outline::outline;
use tree_sitter_hades::parser::{parse_file, syntax_errors, HadesParser};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn top_level_kinds(src: &str) -> (Vec<String>, bool) {
    let tree = HadesParser::new().unwrap().parse(src).unwrap();
    let root = tree.root_node();
    let mut cursor = root.walk();
    let kinds = root
        .named_children(&mut cursor)
        .map(|n| n.kind().to_string())
        .collect();
    (kinds, root.has_error())
}

// ── 合法输入 ──────────────────────────────────────────────────────────────────

#[rstest]
#[case("let a = b;", "var_decl")]
#[case("let a = 12;", "var_decl")]
#[case(r#"let a = "s\"q";"#, "var_decl")]
#[case("let a = next();;", "var_decl")]
#[case("go();", "function_call")]
#[case(r#"go(a 1 "b");"#, "function_call")]
#[case("fn f(): bool {}", "function_definition")]
#[case("fn f(): int { return -x; }", "function_definition")]
#[case("fn f(): int { return 2 * 3; }", "function_definition")]
#[case("fn f(): int { return n % 2; }", "function_definition")]
#[case("fn f(): bool { return a >= 10; }", "function_definition")]
#[case("fn f(): bool { return a || b; }", "function_definition")]
#[case("fn f(): bool { return a = 1; }", "function_definition")]
#[case(r#"fn f(): bool { return "a" == "b"; }"#, "function_definition")]
fn test_valid_source(#[case] src: &str, #[case] kind: &str) {
    let (kinds, has_error) = top_level_kinds(src);
    assert!(!has_error, "unexpected error in {src:?}");
    assert_eq!(kinds, vec![kind.to_string()]);
}

// ── 非法输入 ──────────────────────────────────────────────────────────────────

#[rstest]
#[case("fn f() int {}")]
#[case("let = 3;")]
#[case("return 1;")]
#[case("fn f(): str {}")]
#[case("let A = 1;")]
#[case("fn f(x): int {}")]
#[case("fn f(): int { return a && 1; }")]
fn test_invalid_source(#[case] src: &str) {
    let tree = HadesParser::new().unwrap().parse(src).unwrap();
    assert!(tree.root_node().has_error(), "expected error in {src:?}");
    assert!(!syntax_errors(&tree, src).is_empty());
}

// ── 样例文件 ──────────────────────────────────────────────────────────────────

#[test]
fn test_hello_fixture_parses_cleanly() {
    let parsed = parse_file(&fixture("hello.hd")).unwrap();
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    assert_eq!(parsed.lines, 11);
}

#[test]
fn test_hello_fixture_outline() {
    let parsed = parse_file(&fixture("hello.hd")).unwrap();
    let o = outline(&parsed.tree, parsed.source.as_bytes());

    let main = o.function("main").expect("main should be outlined");
    assert_eq!(main.return_type, "int");
    assert_eq!((main.start_line, main.end_line), (4, 8));
    assert_eq!(main.calls, vec!["print"]);

    let globals: Vec<_> = o
        .variables
        .iter()
        .filter(|v| v.scope.is_none())
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(globals, vec!["greeting", "count"]);

    let callees: Vec<_> = o.calls.iter().map(|c| c.callee.as_str()).collect();
    assert_eq!(callees, vec!["print", "main"]);
    assert_eq!(o.calls[0].args, vec!["greeting", "count"]);
}

#[test]
fn test_logic_fixture_returns() {
    let parsed = parse_file(&fixture("logic.hd")).unwrap();
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    let o = outline(&parsed.tree, parsed.source.as_bytes());
    let ops: Vec<_> = o.returns.iter().map(|r| r.operator.as_deref()).collect();
    assert_eq!(ops, vec![Some("&&"), Some("=="), Some("!")]);
    assert!(o.functions.iter().all(|f| f.return_type == "bool"));
}

#[test]
fn test_broken_fixture_reports_line() {
    let parsed = parse_file(&fixture("broken.hd")).unwrap();
    assert!(!parsed.errors.is_empty());
    assert!(parsed.errors.iter().any(|e| e.line == 3), "{:?}", parsed.errors);
}
