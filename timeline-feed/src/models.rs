use serde::{Deserialize, Serialize};
use timeline_common::Post;

use crate::calendar::month_label;

/// 当前生效的筛选条件
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActiveFilter {
    /// 全部日记
    #[default]
    All,
    /// 某年某月的日记
    ByMonth { year: String, month: String },
}

impl ActiveFilter {
    pub fn by_month(year: impl Into<String>, month: impl Into<String>) -> Self {
        ActiveFilter::ByMonth {
            year: year.into(),
            month: month.into(),
        }
    }

    /// 年月都必须完全相等
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::ByMonth { year, month } => post.year == *year && post.month == *month,
        }
    }

    /// 时间线上方的标题
    pub fn title(&self) -> String {
        match self {
            ActiveFilter::All => "最新动态".to_string(),
            ActiveFilter::ByMonth { year, month } => format!("{}年 {}", year, month_label(month)),
        }
    }
}

/// 一次渲染的结果，交给界面层绘制
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRender<'a> {
    /// 重新渲染且没有任何日记，显示 "暂无日记。" 并隐藏加载更多
    Empty,
    /// 追加卡片；`reset` 为真时先清空列表
    Cards {
        reset: bool,
        posts: Vec<&'a Post>,
        has_more: bool,
    },
}

impl FeedRender<'_> {
    /// 加载更多按钮是否可见
    pub fn shows_load_more(&self) -> bool {
        matches!(self, FeedRender::Cards { has_more: true, .. })
    }
}
