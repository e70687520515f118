use anyhow::{anyhow, bail, Context};
use log::debug;
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tree_sitter::{InputEdit, Node, Point, Tree};
use tree_sitter_language::LanguageFn;

use crate::loader::{load_parser, LoadFailure};
use crate::LANGUAGE;

// ── 解析器 ────────────────────────────────────────────────────────────────────

/// 已装载 Hades 语法的 tree-sitter 解析器
pub struct HadesParser {
    inner: tree_sitter::Parser,
}

impl HadesParser {
    pub fn new() -> Result<Self, LoadFailure> {
        Self::with_language(LANGUAGE)
    }

    /// 复用加载检查时装好语法的 Parser
    pub fn with_language(builder: LanguageFn) -> Result<Self, LoadFailure> {
        let (_, inner) = load_parser(builder)?;
        Ok(Self { inner })
    }

    pub fn parse(&mut self, source: &str) -> anyhow::Result<Tree> {
        self.inner
            .parse(source, None)
            .ok_or_else(|| anyhow!("parse returned None"))
    }

    /// 增量重解析：先把 edit 应用到旧树，再以旧树为基础解析新源码
    pub fn reparse(
        &mut self,
        old_tree: &mut Tree,
        edit: &InputEdit,
        new_source: &str,
    ) -> anyhow::Result<Tree> {
        old_tree.edit(edit);
        let tree = self
            .inner
            .parse(new_source, Some(old_tree))
            .ok_or_else(|| anyhow!("incremental parse returned None"))?;
        debug!(
            "reparsed {} bytes, {} changed range(s)",
            new_source.len(),
            old_tree.changed_ranges(&tree).len()
        );
        Ok(tree)
    }
}

// ── 编辑 ──────────────────────────────────────────────────────────────────────

/// 计算把 `old_source[range]` 替换为 `new_text` 对应的 InputEdit，并返回替换后的源码
pub fn replace_range(
    old_source: &str,
    range: Range<usize>,
    new_text: &str,
) -> anyhow::Result<(InputEdit, String)> {
    if range.start > range.end || range.end > old_source.len() {
        bail!(
            "edit range {}..{} is out of bounds for {} bytes",
            range.start,
            range.end,
            old_source.len()
        );
    }
    if !old_source.is_char_boundary(range.start) || !old_source.is_char_boundary(range.end) {
        bail!("edit range {}..{} splits a character", range.start, range.end);
    }

    let mut new_source = String::with_capacity(old_source.len() - range.len() + new_text.len());
    new_source.push_str(&old_source[..range.start]);
    new_source.push_str(new_text);
    new_source.push_str(&old_source[range.end..]);

    let new_end_byte = range.start + new_text.len();
    let edit = InputEdit {
        start_byte: range.start,
        old_end_byte: range.end,
        new_end_byte,
        start_position: point_at(old_source, range.start),
        old_end_position: point_at(old_source, range.end),
        new_end_position: point_at(&new_source, new_end_byte),
    };
    Ok((edit, new_source))
}

/// 字节偏移对应的 (行, 列)，均从 0 开始，列按字节计
fn point_at(source: &str, byte: usize) -> Point {
    let before = &source.as_bytes()[..byte];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(nl) => byte - nl - 1,
        None => byte,
    };
    Point::new(row, column)
}

// ── 语法错误 ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "kind", rename_all = "lowercase")]
pub enum SyntaxErrorKind {
    /// 无法归约的输入
    Error,
    /// 解析器为恢复而插入的缺失节点
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: usize,
    pub column: usize,
    pub excerpt: String,
}

impl SyntaxError {
    pub fn message(&self) -> String {
        match &self.kind {
            SyntaxErrorKind::Error if self.excerpt.is_empty() => "unexpected input".to_string(),
            SyntaxErrorKind::Error => format!("unexpected `{}`", self.excerpt),
            SyntaxErrorKind::Missing(kind) => format!("missing `{kind}`"),
        }
    }
}

const EXCERPT_LIMIT: usize = 40;

/// 收集所有 ERROR / MISSING 节点；ERROR 节点内部不再继续下钻
pub fn syntax_errors(tree: &Tree, source: &str) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    collect_errors(tree.root_node(), source.as_bytes(), &mut errors);
    errors
}

fn collect_errors(node: Node, source: &[u8], errors: &mut Vec<SyntaxError>) {
    if node.is_missing() {
        errors.push(SyntaxError {
            kind: SyntaxErrorKind::Missing(node.kind().to_string()),
            line: node.start_position().row + 1,
            column: node.start_position().column + 1,
            excerpt: String::new(),
        });
        return;
    }
    if node.is_error() {
        let text = node.utf8_text(source).unwrap_or("");
        let first_line = text.lines().next().unwrap_or("").trim();
        errors.push(SyntaxError {
            kind: SyntaxErrorKind::Error,
            line: node.start_position().row + 1,
            column: node.start_position().column + 1,
            excerpt: first_line.chars().take(EXCERPT_LIMIT).collect(),
        });
        return;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, source, errors);
    }
}

// ── 文件解析 ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    pub errors: Vec<SyntaxError>,
    pub lines: u32,
}

pub fn parse_source(parser: &mut HadesParser, path: &Path, source: String) -> anyhow::Result<ParsedFile> {
    let tree = parser
        .parse(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let errors = syntax_errors(&tree, &source);
    let lines = source.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    debug!("parsed {} ({} lines, {} errors)", path.display(), lines, errors.len());
    Ok(ParsedFile {
        path: path.to_path_buf(),
        source,
        tree,
        errors,
        lines,
    })
}

/// 读取并解析单个源文件
pub fn parse_file(path: &Path) -> anyhow::Result<ParsedFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let mut parser = HadesParser::new()?;
    parse_source(&mut parser, path, source)
}

// ── 测试 ──────────────────────────────────────────────────────────────────────
