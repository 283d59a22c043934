use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// 模板中未替换的用户名占位符
pub const PLACEHOLDER_OWNER: &str = "你的GitHub用户名";

/// 站点配置 - 页面加载前一次性设置
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// GitHub 用户名
    pub repo_owner: String,
    /// 仓库名称
    pub repo_name: String,
    /// 分支名称，通常是 main 或 master
    pub branch: String,
    /// 日记根目录
    pub base_path: String,
    pub api_base: String,
    pub raw_base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            repo_owner: PLACEHOLDER_OWNER.to_string(),
            repo_name: String::new(),
            branch: "main".to_string(),
            base_path: "posts".to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            repo_owner: owner.into(),
            repo_name: repo.into(),
            ..Self::default()
        }
    }

    /// 在发出任何请求之前检查配置是否已填写
    pub fn validate(&self) -> Result<(), TimelineError> {
        let owner = self.repo_owner.trim();
        if owner.is_empty()
            || owner == PLACEHOLDER_OWNER
            || self.repo_name.trim().is_empty()
            || self.branch.trim().is_empty()
        {
            return Err(TimelineError::ConfigMissing);
        }
        Ok(())
    }

    /// 递归列出仓库文件树的接口地址
    pub fn tree_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name,
            self.branch
        )
    }

    /// 文件原始内容地址
    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name,
            self.branch,
            path.trim_start_matches('/')
        )
    }

    /// 去掉首尾斜杠的日记根目录，空字符串表示整个仓库
    pub fn posts_root(&self) -> &str {
        self.base_path.trim_matches('/')
    }
}
