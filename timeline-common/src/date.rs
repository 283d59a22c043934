//! 从文件路径推断日期。
//!
//! 期望的目录结构是 `posts/{年}/{月}/{日}[-{星期}]/{文件名}`，但这只是启发式规则：
//! 缺失或格式不符的片段会退回到能解析出的最粗粒度，而不是报错。
//! 不校验日历合法性，`2024/13` 会得到排序键 `2024-13`。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{OTHER_CATEGORY, UNKNOWN_DATE};

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());
static MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").unwrap());
static DAY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{1,2})(?:-(.+))?$").unwrap());

/// 星期的英文名到中文名映射，区分大小写
const WEEKDAY_NAMES: [(&str, &str); 7] = [
    ("Monday", "星期一"),
    ("Tuesday", "星期二"),
    ("Wednesday", "星期三"),
    ("Thursday", "星期四"),
    ("Friday", "星期五"),
    ("Saturday", "星期六"),
    ("Sunday", "星期日"),
];

/// 解析出的日期精度
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Unknown,
    /// 只找到年份，排序与展示仍按未知日期处理
    Year,
    Month,
    Day,
}

/// 路径日期解析结果
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateInfo {
    pub precision: DatePrecision,
    pub sort_key: String,
    pub display_date: String,
    pub year: String,
    pub month: String,
    pub day: Option<String>,
    pub weekday: Option<String>,
}

impl DateInfo {
    /// 完全无法识别日期的结果
    pub fn unknown() -> Self {
        Self {
            precision: DatePrecision::Unknown,
            sort_key: UNKNOWN_DATE.to_string(),
            display_date: UNKNOWN_DATE.to_string(),
            year: OTHER_CATEGORY.to_string(),
            month: OTHER_CATEGORY.to_string(),
            day: None,
            weekday: None,
        }
    }
}

/// 星期英文名对应的中文名，未识别的返回 None
pub fn localized_weekday(token: &str) -> Option<&'static str> {
    WEEKDAY_NAMES
        .iter()
        .find(|(english, _)| *english == token)
        .map(|(_, local)| *local)
}

/// 一次解析尝试：输入从年份开始的路径片段
type Attempt = fn(&[&str]) -> Option<DateInfo>;

/// 由细到粗依次尝试，第一个成功的即为结果
const ATTEMPTS: [Attempt; 3] = [day_precision, month_precision, year_precision];

/// 从仓库相对路径中提取日期
pub fn extract_date(path: &str) -> DateInfo {
    let segments: Vec<&str> = path.split('/').collect();

    segments
        .iter()
        .position(|segment| YEAR_PATTERN.is_match(segment))
        .and_then(|at| {
            let tail = &segments[at..];
            ATTEMPTS.iter().find_map(|attempt| attempt(tail))
        })
        .unwrap_or_else(DateInfo::unknown)
}

fn day_precision(tail: &[&str]) -> Option<DateInfo> {
    let [year, month, day_segment, ..] = tail else {
        return None;
    };
    if !MONTH_PATTERN.is_match(month) {
        return None;
    }
    let captures = DAY_PATTERN.captures(day_segment)?;
    let month = pad_two(month);
    let day = pad_two(&captures[1]);
    let weekday = captures.get(2).map(|m| m.as_str().to_string());

    let mut display_date = format!("{}年{}月{}日", year, lenient_number(&month), lenient_number(&day));
    if let Some(local) = weekday.as_deref().and_then(localized_weekday) {
        display_date.push(' ');
        display_date.push_str(local);
    }

    Some(DateInfo {
        precision: DatePrecision::Day,
        sort_key: format!("{}-{}-{}", year, month, day),
        display_date,
        year: year.to_string(),
        month,
        day: Some(day),
        weekday,
    })
}

fn month_precision(tail: &[&str]) -> Option<DateInfo> {
    let [year, month, ..] = tail else {
        return None;
    };
    if !MONTH_PATTERN.is_match(month) {
        return None;
    }
    let month = pad_two(month);

    Some(DateInfo {
        precision: DatePrecision::Month,
        sort_key: format!("{}-{}", year, month),
        display_date: format!("{}年{}月", year, lenient_number(&month)),
        year: year.to_string(),
        month,
        day: None,
        weekday: None,
    })
}

fn year_precision(tail: &[&str]) -> Option<DateInfo> {
    let year = tail.first()?;

    Some(DateInfo {
        precision: DatePrecision::Year,
        year: year.to_string(),
        ..DateInfo::unknown()
    })
}

fn pad_two(digits: &str) -> String {
    format!("{:0>2}", digits)
}

/// 去掉前导零用于展示，片段已由正则保证是 1-2 位数字
fn lenient_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}
