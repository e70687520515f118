use ignore::WalkBuilder;
use log::debug;
use std::path::{Path, PathBuf};

use crate::FILE_EXTENSION;

/// 默认排除目录
const DEFAULT_EXCLUDE: &[&str] = &[".git", "target", "build"];

/// 是否为 Hades 源文件（按扩展名判断）
pub fn is_hades_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(FILE_EXTENSION))
        .unwrap_or(false)
}

/// 遍历目录，返回所有 Hades 源文件路径（已排序）；传入文件时原样返回
pub fn discover_sources(root: &Path, extra_exclude: &[String]) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_hades_source(path) {
            continue;
        }
        if is_excluded(path, root, extra_exclude) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    debug!("discovered {} source file(s) under {}", files.len(), root.display());
    files
}

fn is_excluded(path: &Path, root: &Path, extra_exclude: &[String]) -> bool {
    let rel = match path.strip_prefix(root) {
        Ok(r) => r,
        Err(_) => return false,
    };

    rel.components().any(|component| {
        let name = component.as_os_str().to_string_lossy();
        DEFAULT_EXCLUDE.contains(&&*name) || extra_exclude.iter().any(|p| p.as_str() == &*name)
    })
}
