use anyhow::Context;
use serde::Serialize;
use tree_sitter::{Language, Query, QueryCursor, StreamingIterator, Tree};

use crate::HIGHLIGHTS_QUERY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub capture: String,
    #[serde(rename = "startByte")]
    pub start_byte: usize,
    #[serde(rename = "endByte")]
    pub end_byte: usize,
    pub line: usize,
    pub text: String,
}

pub fn highlight_query(language: &Language) -> anyhow::Result<Query> {
    Query::new(language, HIGHLIGHTS_QUERY).context("invalid highlights query")
}

/// 按文档顺序返回高亮区间。
///
/// 同一节点命中多个模式时，保留 highlights.scm 中靠前的那个。
pub fn highlights(tree: &Tree, source: &[u8]) -> anyhow::Result<Vec<HighlightSpan>> {
    let query = highlight_query(&crate::language())?;
    let names = query.capture_names();

    let mut hits: Vec<(usize, usize, usize, usize)> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(&query, tree.root_node(), source);
    while let Some((m, index)) = captures.next() {
        let capture = m.captures[*index];
        let node = capture.node;
        hits.push((
            node.start_byte(),
            node.end_byte(),
            m.pattern_index,
            capture.index as usize,
        ));
    }

    hits.sort();
    hits.dedup_by_key(|(start, end, _, _)| (*start, *end));

    let spans = hits
        .into_iter()
        .map(|(start, end, _, capture)| {
            let text = std::str::from_utf8(&source[start..end]).unwrap_or("").to_string();
            let line = source[..start].iter().filter(|&&b| b == b'\n').count() + 1;
            HighlightSpan {
                capture: names[capture].to_string(),
                start_byte: start,
                end_byte: end,
                line,
                text,
            }
        })
        .collect();
    Ok(spans)
}
