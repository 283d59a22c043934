use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};

/// 日期文件夹名，例如 "05-Friday"
pub fn day_folder_name(date: NaiveDate) -> String {
    format!("{:02}-{}", date.day(), date.format("%A"))
}

/// 某月的全部日期
pub fn days_of_month(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    if !(1000..=9999).contains(&year) {
        bail!("年份必须是四位数字: {}", year);
    }
    if !(1..=12).contains(&month) {
        bail!("月份必须在 1 到 12 之间: {}", month);
    }
    Ok((1..=31)
        .map_while(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect())
}

/// 生成 `{root}/{年}/{月}/{日}-{星期}/.gitkeep`，返回新建的文件夹；已有的文件夹保持不变
pub fn scaffold_month(root: &Path, year: i32, month: u32, verbose: bool) -> Result<Vec<PathBuf>> {
    let month_dir = root.join(year.to_string()).join(format!("{:02}", month));
    println!("生成 {}-{:02} 的文件夹...", year, month);

    let mut created = Vec::new();
    for date in days_of_month(year, month)? {
        let day_dir = month_dir.join(day_folder_name(date));
        if day_dir.exists() {
            if verbose {
                println!("  已存在: {}", day_dir.display());
            }
            continue;
        }

        fs::create_dir_all(&day_dir)
            .with_context(|| format!("无法创建文件夹 {}", day_dir.display()))?;
        // 空文件夹无法提交到 git
        let keep = day_dir.join(".gitkeep");
        fs::File::create(&keep).with_context(|| format!("无法创建 {}", keep.display()))?;

        if verbose {
            println!("  已创建: {}", day_dir.display());
        }
        created.push(day_dir);
    }
    Ok(created)
}

pub fn scaffold_year(root: &Path, year: i32, verbose: bool) -> Result<Vec<PathBuf>> {
    println!("生成 {} 年全年的文件夹...", year);
    let mut created = Vec::new();
    for month in 1..=12 {
        created.extend(scaffold_month(root, year, month, verbose)?);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_common::{extract_date, DatePrecision};

    #[test]
    fn folder_names_carry_english_weekday() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        assert_eq!(day_folder_name(date), "05-Friday");
    }

    #[test]
    fn month_lengths_follow_calendar() {
        assert_eq!(days_of_month(2024, 2).unwrap().len(), 29);
        assert_eq!(days_of_month(2023, 2).unwrap().len(), 28);
        assert_eq!(days_of_month(2024, 12).unwrap().len(), 31);
        assert!(days_of_month(2024, 13).is_err());
        assert!(days_of_month(24, 1).is_err());
    }

    #[test]
    fn scaffolded_month_parses_back_to_days() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("posts");
        let created = scaffold_month(&root, 2025, 9, false).unwrap();
        assert_eq!(created.len(), 30);

        for day_dir in &created {
            assert!(day_dir.join(".gitkeep").is_file());
            let relative = day_dir.strip_prefix(dir.path()).unwrap();
            let path = format!("{}/entry.md", relative.to_string_lossy().replace('\\', "/"));
            let info = extract_date(&path);
            assert_eq!(info.precision, DatePrecision::Day);
            assert!(info.display_date.contains("星期"), "{}", info.display_date);
        }
    }

    #[test]
    fn rerun_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        scaffold_month(root, 2024, 1, false).unwrap();
        let entry = root.join("2024/01/01-Monday/entry.md");
        fs::write(&entry, "hello").unwrap();

        let again = scaffold_month(root, 2024, 1, false).unwrap();
        assert!(again.is_empty());
        assert_eq!(fs::read_to_string(&entry).unwrap(), "hello");
        assert!(!root.join("2024/01/01-Monday/.gitkeep").exists() || entry.exists());
    }

    #[test]
    fn only_missing_days_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2024/02/10-Saturday")).unwrap();
        fs::create_dir_all(root.join("2024/02/11-Sunday")).unwrap();

        let created = scaffold_month(root, 2024, 2, false).unwrap();
        assert_eq!(created.len(), 27);
        assert!(!created.contains(&root.join("2024/02/10-Saturday")));
        assert!(!root.join("2024/02/10-Saturday/.gitkeep").exists());
        assert!(root.join("2024/02/12-Monday/.gitkeep").is_file());
    }

    #[test]
    fn full_year() {
        let dir = tempfile::tempdir().unwrap();
        let created = scaffold_year(dir.path(), 2023, false).unwrap();
        assert_eq!(created.len(), 365);
    }
}
