use gloo_net::http::Request;
use timeline_common::{classify_status, filter_post_files, RepoFileEntry, SiteConfig, TimelineError, TreeListing};

use crate::log;

/// 从 GitHub API 获取整个仓库的文件树，只保留日记文件
pub async fn list_post_files(config: &SiteConfig) -> Result<Vec<RepoFileEntry>, TimelineError> {
    let url = config.tree_url();
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| TimelineError::Network(e.to_string()))?;

    classify_status(response.status())?;

    let body = response
        .text()
        .await
        .map_err(|e| TimelineError::Network(e.to_string()))?;
    let listing = TreeListing::from_json(&body)?;
    if listing.truncated {
        log::warn("仓库文件树过大，GitHub 返回的结果被截断，部分日记可能不会显示");
    }

    let total = listing.tree.len();
    let files = filter_post_files(listing.tree, config);
    log::info(&format!("仓库共 {} 个条目，其中日记文件 {} 个", total, files.len()));
    Ok(files)
}

/// 获取单篇日记的原始内容
pub async fn fetch_raw(url: &str) -> Result<String, TimelineError> {
    let failed = |reason: String| TimelineError::ContentFetchFailed {
        url: url.to_string(),
        reason,
    };

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| failed(e.to_string()))?;
    if !response.ok() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    response.text().await.map_err(|e| failed(e.to_string()))
}
