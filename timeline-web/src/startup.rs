use std::future::Future;

use timeline_common::{build_catalog, Post, RepoFileEntry, SiteConfig, TimelineError};

/// 启动流程：先校验配置，通过后才获取文件列表，最后生成目录。
///
/// `list` 只在校验通过后调用一次。
pub async fn bootstrap<F, Fut>(config: &SiteConfig, list: F) -> Result<Vec<Post>, TimelineError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<RepoFileEntry>, TimelineError>>,
{
    config.validate()?;
    let files = list().await?;
    Ok(build_catalog(&files, config))
}
