use thiserror::Error;

/// 时间线加载与展示过程中的错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// 配置仍是模板占位符，不发出任何请求
    #[error("请先修改站点配置，填入你的 GitHub 用户名和仓库名！")]
    ConfigMissing,

    /// 仓库或分支不存在、或者不是公开仓库
    #[error("仓库未找到 (404)。请检查用户名和仓库名是否正确，或者仓库是否为 Public。")]
    NotFound,

    #[error("API 访问频率受限 ({status})。请稍后再试。")]
    RateLimited { status: u16 },

    #[error("GitHub API Error: {status}")]
    RequestFailed { status: u16 },

    /// 请求未能到达服务器
    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("无法解析接口返回的数据: {0}")]
    InvalidResponse(String),

    /// 打开单篇日记时获取内容失败，只影响详情弹窗
    #[error("加载内容失败。请检查文件路径或网络。")]
    ContentFetchFailed { url: String, reason: String },
}
