use crate::config::SiteConfig;
use crate::error::TimelineError;
use crate::models::{EntryKind, FileType, RepoFileEntry};

/// 按状态码归类仓库树接口的失败
pub fn classify_status(status: u16) -> Result<(), TimelineError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(TimelineError::NotFound),
        // GitHub 用 403 表示配额耗尽，二级限流用 429
        403 | 429 => Err(TimelineError::RateLimited { status }),
        _ => Err(TimelineError::RequestFailed { status }),
    }
}

/// 条目是否位于日记根目录之下
pub fn is_under_root(path: &str, root: &str) -> bool {
    if root.is_empty() {
        return true;
    }
    path.strip_prefix(root)
        .map_or(false, |rest| rest.starts_with('/'))
}

/// 是否是应当收录的日记文件
pub fn is_post_file(entry: &RepoFileEntry, config: &SiteConfig) -> bool {
    entry.kind == EntryKind::Blob
        && is_under_root(&entry.path, config.posts_root())
        && FileType::split_file_name(entry.file_name()).is_some()
}

/// 只保留日记根目录下的 .md / .txt 文件
pub fn filter_post_files(tree: Vec<RepoFileEntry>, config: &SiteConfig) -> Vec<RepoFileEntry> {
    tree.into_iter()
        .filter(|entry| is_post_file(entry, config))
        .collect()
}
