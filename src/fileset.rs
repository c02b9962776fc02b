//! 把变更文件列表转换为待扫描目录。
//! 必须扫描目录而非单个文件，phpcs 的扩展名约束才会生效。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 按换行拆分，去掉空行，取每个路径的所在目录，按首次出现顺序去重。
/// 只去掉行尾的 \r，路径中的空格原样保留
pub fn candidate_dirs(file_list: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    file_list
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| parent_dir(Path::new(line)))
        .filter(|dir| seen.insert(dir.clone()))
        .collect()
}

/// 与 dirname 一致：无目录部分时为 "."，根路径保持不变
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => path.to_path_buf(),
    }
}
