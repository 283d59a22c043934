use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use timeline_common::{build_catalog, filter_post_files, Post, RepoFileEntry, SiteConfig};
use timeline_feed::{month_label, NavigationIndex, YearGroup};
use walkdir::WalkDir;

/// 本地预览结果，与浏览器端看到的目录一致
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub total: usize,
    pub calendar: Vec<YearGroup>,
    pub posts: Vec<Post>,
}

/// 递归遍历本地仓库，生成与 Git Trees 接口相同形式的条目
pub fn collect_entries(source: &Path) -> Result<Vec<RepoFileEntry>> {
    let mut entries = Vec::new();

    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.context("遍历目录时出错")?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("路径不在源目录内: {}", entry.path().display()))?;
        let path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push(RepoFileEntry::blob(path));
    }
    Ok(entries)
}

pub fn scan(source: &Path, config: &SiteConfig, verbose: bool) -> Result<ScanReport> {
    let entries = collect_entries(source)?;
    let total_files = entries.len();
    let files = filter_post_files(entries, config);
    if verbose {
        println!("文件总数: {}, 日记文件数: {}", total_files, files.len());
    }

    let posts = build_catalog(&files, config);
    let index = NavigationIndex::build(&posts);
    Ok(ScanReport {
        total: index.total(),
        calendar: index.year_groups(),
        posts,
    })
}

/// 打印日历和时间线
pub fn print_report(report: &ScanReport, verbose: bool) {
    if report.posts.is_empty() {
        println!("没有找到日记文件。请确认 posts 文件夹下有 .md 或 .txt 文件。");
        return;
    }

    println!("查看全部 ({})", report.total);
    for group in &report.calendar {
        let months: Vec<String> = group.months.iter().map(|m| month_label(m)).collect();
        println!("  {}: {}", group.label(), months.join(" "));
    }

    println!();
    for post in &report.posts {
        println!("{}  {}", post.display_date, post.title);
        if verbose {
            println!("    {}", post.content_url);
        }
    }
}
