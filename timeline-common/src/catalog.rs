use std::cmp::Ordering;

use crate::config::SiteConfig;
use crate::date::extract_date;
use crate::models::{FileType, Post, RepoFileEntry};

/// 将仓库文件列表转换为按日期倒序排列的日记目录。
///
/// 不会失败：无法解析的日期按 "未知日期" 处理并排在最后。
/// 不是 .md / .txt 的条目直接跳过。
pub fn build_catalog(entries: &[RepoFileEntry], config: &SiteConfig) -> Vec<Post> {
    let mut posts: Vec<Post> = entries
        .iter()
        .filter_map(|entry| build_post(entry, config))
        .collect();

    sort_newest_first(&mut posts);
    posts
}

/// 由单个文件条目生成日记
pub fn build_post(entry: &RepoFileEntry, config: &SiteConfig) -> Option<Post> {
    let file_name = entry.file_name();
    let (file_type, stem) = FileType::split_file_name(file_name)?;
    let title = if stem.is_empty() { file_name } else { stem };

    Some(Post::assemble(
        title.to_string(),
        extract_date(&entry.path),
        entry.path.clone(),
        config.raw_url(&entry.path),
        file_type,
    ))
}

/// 已知日期在前并按排序键倒序，未知日期一律排在最后
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    (b.has_known_date(), b.sort_key.as_str()).cmp(&(a.has_known_date(), a.sort_key.as_str()))
}

pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(newest_first);
}
