/// 命令行集成测试
use std::path::Path;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hades-grammar"))
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_check_json() {
    let out = bin().args(["check", "--json"]).output().unwrap();
    assert!(out.status.success());
    let info: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(info["name"], "hades");
    assert!(info["nodeKindCount"].as_u64().unwrap() > 0);
}

#[test]
fn test_parse_clean_file() {
    let out = bin().args(["parse", &fixture("hello.hd")]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("(source_file"));
}

#[test]
fn test_parse_broken_file_fails() {
    let out = bin().args(["parse", "--quiet", &fixture("broken.hd")]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken.hd:3:"), "{stderr}");
}

#[test]
fn test_outline_json() {
    let out = bin().args(["outline", &fixture("hello.hd")]).output().unwrap();
    assert!(out.status.success());
    let outline: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(outline["functions"][0]["name"], "main");
}

#[test]
fn test_highlight_lines() {
    let out = bin().args(["highlight", &fixture("logic.hd")]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.lines().any(|l| l.contains("keyword") && l.ends_with("fn")));
}

#[test]
fn test_outline_missing_file() {
    let out = bin().args(["outline", "no/such/file.hd"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_parse_requires_path() {
    let out = bin().arg("parse").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("<PATH>"), "{stderr}");
}
