use serde::{Deserialize, Serialize};

use crate::date::DateInfo;
use crate::error::TimelineError;

/// 无法解析日期时的排序键与展示文本
pub const UNKNOWN_DATE: &str = "未知日期";

/// 无法解析年份或月份时的归类
pub const OTHER_CATEGORY: &str = "其他";

/// 仓库树条目类型
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// 普通文件
    Blob,
    /// 目录
    Tree,
    /// 子模块
    Commit,
    #[serde(other)]
    Other,
}

/// 仓库文件条目 - 来自 Git Trees 接口
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RepoFileEntry {
    /// 仓库内相对路径
    pub path: String,
    /// 条目类型
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl RepoFileEntry {
    pub fn blob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
        }
    }

    /// 路径最后一段，即文件名
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// 仓库树接口的响应体，其余字段忽略
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TreeListing {
    pub tree: Vec<RepoFileEntry>,
    /// 仓库过大时 GitHub 会截断结果
    #[serde(default)]
    pub truncated: bool,
}

impl TreeListing {
    /// 从接口返回的 JSON 文本解析
    pub fn from_json(body: &str) -> Result<Self, TimelineError> {
        serde_json::from_str(body).map_err(|e| TimelineError::InvalidResponse(e.to_string()))
    }
}

/// 文件类型，由扩展名决定
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// `.md`，按 Markdown 渲染
    Markdown,
    /// `.txt`，转义后原样显示
    Plaintext,
}

impl FileType {
    /// 接受的扩展名及对应类型
    pub const ACCEPTED: [(&'static str, FileType); 2] =
        [(".md", FileType::Markdown), (".txt", FileType::Plaintext)];

    /// 按扩展名识别文件，返回类型和去掉扩展名后的部分
    pub fn split_file_name(name: &str) -> Option<(FileType, &str)> {
        Self::ACCEPTED
            .iter()
            .find_map(|(ext, kind)| name.strip_suffix(ext).map(|stem| (*kind, stem)))
    }
}

/// 日记条目 - 由仓库中的单个文件生成
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// 标题，文件名去掉扩展名
    pub title: String,
    /// 排序键：YYYY-MM-DD、YYYY-MM 或 "未知日期"
    pub sort_key: String,
    /// 展示日期，例如 "2024年7月5日 星期五"
    pub display_date: String,
    /// 四位年份或 "其他"
    pub year: String,
    /// 两位月份或 "其他"
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub day: Option<String>,
    /// 路径中的原始星期片段
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weekday: Option<String>,
    /// 仓库内相对路径
    pub path: String,
    /// 原始内容地址
    pub content_url: String,
    pub file_type: FileType,
}

impl Post {
    pub(crate) fn assemble(
        title: String,
        date: DateInfo,
        path: String,
        content_url: String,
        file_type: FileType,
    ) -> Self {
        Self {
            title,
            sort_key: date.sort_key,
            display_date: date.display_date,
            year: date.year,
            month: date.month,
            day: date.day,
            weekday: date.weekday,
            path,
            content_url,
            file_type,
        }
    }

    /// 是否解析出了可排序的日期
    pub fn has_known_date(&self) -> bool {
        self.sort_key != UNKNOWN_DATE
    }
}
