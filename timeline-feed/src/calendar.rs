use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use timeline_common::{Post, OTHER_CATEGORY};

/// 日历导航索引：年份 -> 出现过的月份
#[derive(Debug, Clone, Default)]
pub struct NavigationIndex {
    years: BTreeMap<String, BTreeSet<String>>,
    total: usize,
}

/// 渲染用的年份分组，月份已按倒序排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub year: String,
    pub months: Vec<String>,
}

impl NavigationIndex {
    /// 遍历一次日记目录构建索引
    pub fn build(posts: &[Post]) -> Self {
        let mut years: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for post in posts {
            years
                .entry(post.year.clone())
                .or_default()
                .insert(post.month.clone());
        }

        Self {
            years,
            total: posts.len(),
        }
    }

    /// 日记总数，用于 "查看全部" 按钮
    pub fn total(&self) -> usize {
        self.total
    }

    /// 年份倒序，年内月份倒序；"其他" 年份不单独显示
    pub fn year_groups(&self) -> Vec<YearGroup> {
        self.years
            .iter()
            .rev()
            .filter(|(year, _)| year.as_str() != OTHER_CATEGORY)
            .map(|(year, months)| {
                let mut months: Vec<String> = months.iter().cloned().collect();
                months.sort_by_key(|month| std::cmp::Reverse(month_rank(month)));
                YearGroup {
                    year: year.clone(),
                    months,
                }
            })
            .collect()
    }

    pub fn view_all_label(&self) -> String {
        format!("查看全部 ({})", self.total)
    }
}

impl YearGroup {
    pub fn label(&self) -> String {
        format!("{}年", self.year)
    }
}

/// 月份按数值排序，"其他" 排在最后
fn month_rank(month: &str) -> Option<u32> {
    month.parse().ok()
}

/// 月份按钮文字，例如 "7月"
pub fn month_label(month: &str) -> String {
    match month.parse::<u32>() {
        Ok(number) => format!("{}月", number),
        Err(_) => month.to_string(),
    }
}
