use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;
use tree_sitter::{Language, Parser, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};
use tree_sitter_language::LanguageFn;

use crate::LANGUAGE;

/// 语法加载失败的固定诊断前缀
pub const LOAD_FAILURE_MESSAGE: &str = "Error loading Hades Parser grammar";

// ── 错误类型 ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    #[error("{}: language handle is null", LOAD_FAILURE_MESSAGE)]
    Null,
    #[error("{}: ABI version {version} is outside the supported range {min}..={max}", LOAD_FAILURE_MESSAGE)]
    IncompatibleVersion {
        version: usize,
        min: usize,
        max: usize,
    },
    #[error("{}: language declares no node kinds", LOAD_FAILURE_MESSAGE)]
    Empty,
    #[error("{}: {0}", LOAD_FAILURE_MESSAGE)]
    Rejected(String),
}

// ── 加载 ──────────────────────────────────────────────────────────────────────

/// 调用语法入口并校验返回的句柄。
///
/// 检查顺序：空指针 → ABI 版本 → 节点种类数 → 交给 Parser 试装载。
/// ABI 版本不在范围内时不会再读取语法表的其余部分。
pub fn load_language(builder: LanguageFn) -> Result<Language, LoadFailure> {
    load_parser(builder).map(|(language, _)| language)
}

/// 同 [`load_language`]，并返回已装载该语法的 Parser
pub fn load_parser(builder: LanguageFn) -> Result<(Language, Parser), LoadFailure> {
    let raw = unsafe { (builder.into_raw())() };
    if raw.is_null() {
        warn!("grammar accessor returned a null handle");
        return Err(LoadFailure::Null);
    }

    let language = Language::new(builder);
    let version = language.abi_version();
    if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
        warn!("grammar ABI version {version} is not supported by this runtime");
        return Err(LoadFailure::IncompatibleVersion {
            version,
            min: MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: LANGUAGE_VERSION,
        });
    }

    if language.node_kind_count() == 0 {
        warn!("grammar declares no node kinds");
        return Err(LoadFailure::Empty);
    }

    // 版本已在上面检查；set_language 目前只会因 ABI 不匹配而失败
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&language) {
        warn!("runtime rejected grammar: {e}");
        return Err(LoadFailure::Rejected(e.to_string()));
    }

    debug!(
        "loaded grammar: abi={} kinds={}",
        version,
        language.node_kind_count()
    );
    Ok((language, parser))
}

/// 确认内置的 Hades 语法可以被运行时装载。成功时无输出。
pub fn verify_grammar_loadable() -> Result<(), LoadFailure> {
    load_language(LANGUAGE).map(|_| ())
}

// ── 语法摘要 ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GrammarInfo {
    pub name: String,
    #[serde(rename = "abiVersion")]
    pub abi_version: usize,
    #[serde(rename = "nodeKindCount")]
    pub node_kind_count: usize,
    #[serde(rename = "namedKindCount")]
    pub named_kind_count: usize,
    #[serde(rename = "fieldCount")]
    pub field_count: usize,
    #[serde(rename = "namedKinds")]
    pub named_kinds: Vec<String>,
}

pub fn grammar_info(language: &Language) -> GrammarInfo {
    let mut named_kinds = Vec::new();
    let mut named_kind_count = 0;
    for id in 0..language.node_kind_count() as u16 {
        if !language.node_kind_is_named(id) {
            continue;
        }
        named_kind_count += 1;
        if !language.node_kind_is_visible(id) {
            continue;
        }
        if let Some(kind) = language.node_kind_for_id(id) {
            // 同名符号（别名、关键字抽取）可能对应多个 id
            if !named_kinds.iter().any(|k| k == kind) {
                named_kinds.push(kind.to_string());
            }
        }
    }
    named_kinds.sort();

    GrammarInfo {
        name: "hades".to_string(),
        abi_version: language.abi_version(),
        node_kind_count: language.node_kind_count(),
        named_kind_count,
        field_count: language.field_count(),
        named_kinds,
    }
}
