use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use tree_sitter::Language;

use crate::NODE_TYPES;

// ── node-types.json 结构 ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeTypeRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub named: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildTypes {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<NodeTypeRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeType {
    #[serde(rename = "type")]
    pub kind: String,
    pub named: bool,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, ChildTypes>,
    pub children: Option<ChildTypes>,
    #[serde(default)]
    pub subtypes: Vec<NodeTypeRef>,
}

impl NodeType {
    /// 允许出现的直接子节点种类
    pub fn child_kinds(&self) -> Vec<&str> {
        self.children
            .iter()
            .flat_map(|c| c.types.iter().map(|t| t.kind.as_str()))
            .collect()
    }
}

pub fn node_types() -> anyhow::Result<Vec<NodeType>> {
    parse_node_types(NODE_TYPES)
}

pub fn parse_node_types(json: &str) -> anyhow::Result<Vec<NodeType>> {
    serde_json::from_str(json).context("invalid node-types.json")
}

/// 列出 node-types.json 中声明、但语法句柄里找不到符号 id 的种类
pub fn missing_kinds(types: &[NodeType], language: &Language) -> Vec<String> {
    let mut missing = Vec::new();
    let mut check = |kind: &str, named: bool| {
        if language.id_for_node_kind(kind, named) == 0 && !missing.iter().any(|m| m == kind) {
            missing.push(kind.to_string());
        }
    };
    for ty in types {
        check(&ty.kind, ty.named);
        for child in ty.children.iter().flat_map(|c| c.types.iter()) {
            check(&child.kind, child.named);
        }
    }
    missing
}
