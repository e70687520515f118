//! Hades 语言的 tree-sitter 语法包。
//!
//! 通常通过 [`LANGUAGE`] 取得语法句柄，交给 tree-sitter [`Parser`] 使用：
//!
//! ```
//! let mut parser = tree_sitter::Parser::new();
//! parser
//!     .set_language(&tree_sitter_hades::LANGUAGE.into())
//!     .expect("Error loading Hades Parser grammar");
//! let tree = parser.parse("fn main(): int { return 0; }", None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```
//!
//! [`Parser`]: https://docs.rs/tree-sitter/latest/tree_sitter/struct.Parser.html

use tree_sitter_language::LanguageFn;

mod grammar_tests;
pub mod highlight;
pub mod loader;
pub mod node_types;
pub mod outline;
pub mod parser;
pub mod sources;

extern "C" {
    fn tree_sitter_hades() -> *const ();
}

/// 由 build.rs 生成并链接的语法入口。
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_hades) };

/// `grammar/grammar.json` 原文
pub const GRAMMAR_JSON: &str = include_str!("../grammar/grammar.json");

/// 静态节点类型描述（[`node-types.json`]）
///
/// [`node-types.json`]: https://tree-sitter.github.io/tree-sitter/using-parsers/6-static-node-types
pub const NODE_TYPES: &str = include_str!("node-types.json");

/// 语法高亮查询（`queries/highlights.scm`）
pub const HIGHLIGHTS_QUERY: &str = include_str!("../queries/highlights.scm");

/// Hades 源文件扩展名
pub const FILE_EXTENSION: &str = "hd";

/// 获取 Hades 的 tree-sitter [`tree_sitter::Language`]。
///
/// 不做任何校验；需要诊断信息时使用 [`loader::load_language`]。
pub fn language() -> tree_sitter::Language {
    LANGUAGE.into()
}
