pub mod catalog;
pub mod config;
pub mod date;
pub mod error;
pub mod models;
pub mod repo;

// 重新导出常用类型和函数，方便直接使用
pub use catalog::{build_catalog, build_post, sort_newest_first};
pub use config::SiteConfig;
pub use date::{extract_date, DateInfo, DatePrecision};
pub use error::TimelineError;
pub use models::{EntryKind, FileType, Post, RepoFileEntry, TreeListing, OTHER_CATEGORY, UNKNOWN_DATE};
pub use repo::{classify_status, filter_post_files};
