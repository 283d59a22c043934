use timeline_common::Post;

pub mod calendar;
pub mod models;

pub use calendar::{month_label, NavigationIndex, YearGroup};
pub use models::{ActiveFilter, FeedRender};

/// 每页显示的日记数量
pub const PAGE_SIZE: usize = 10;

/// 时间线状态 - 持有完整目录、当前筛选结果和页码。
///
/// 所有数据在启动时一次性加载，筛选与翻页只在内存中按下标切片，不会重新请求。
#[derive(Debug, Clone)]
pub struct TimelineFeed {
    catalog: Vec<Post>,
    /// 当前筛选结果在目录中的下标，保持目录顺序
    active: Vec<usize>,
    filter: ActiveFilter,
    /// 从 1 开始
    page_cursor: usize,
}

impl TimelineFeed {
    /// `catalog` 需已按日期倒序排列
    pub fn new(catalog: Vec<Post>) -> Self {
        let active = (0..catalog.len()).collect();
        Self {
            catalog,
            active,
            filter: ActiveFilter::All,
            page_cursor: 1,
        }
    }

    pub fn catalog(&self) -> &[Post] {
        &self.catalog
    }

    pub fn is_catalog_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn filter(&self) -> &ActiveFilter {
        &self.filter
    }

    pub fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    /// 当前筛选结果
    pub fn active_posts(&self) -> impl Iterator<Item = &Post> + '_ {
        self.active.iter().map(move |&i| &self.catalog[i])
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// 回到全部日记，页码回到第一页
    pub fn reset_view(&mut self) {
        self.apply_filter(ActiveFilter::All);
    }

    pub fn filter_by_month(&mut self, year: &str, month: &str) {
        self.apply_filter(ActiveFilter::by_month(year, month));
    }

    pub fn apply_filter(&mut self, filter: ActiveFilter) {
        self.active = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, post)| filter.matches(post))
            .map(|(i, _)| i)
            .collect();
        self.filter = filter;
        self.rewind();
    }

    /// 重新渲染前回到第一页
    pub fn rewind(&mut self) {
        self.page_cursor = 1;
    }

    /// 翻到下一页，随后以 `render(false)` 追加
    pub fn load_more(&mut self) {
        self.page_cursor += 1;
    }

    /// 当前页应显示的日记；`reset` 表示清空后重新绘制
    pub fn render(&self, reset: bool) -> FeedRender<'_> {
        let range = self.page_range();
        if range.is_empty() && reset {
            return FeedRender::Empty;
        }

        FeedRender::Cards {
            reset,
            posts: self.active[range].iter().map(|&i| &self.catalog[i]).collect(),
            has_more: self.has_more(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.page_cursor * PAGE_SIZE < self.active.len()
    }

    /// 目前为止已显示的日记数量
    pub fn visible_count(&self) -> usize {
        (self.page_cursor * PAGE_SIZE).min(self.active.len())
    }

    /// 当前页在 `active` 中的下标范围，超出末尾时为空
    fn page_range(&self) -> std::ops::Range<usize> {
        let len = self.active.len();
        let start = ((self.page_cursor - 1) * PAGE_SIZE).min(len);
        let end = (self.page_cursor * PAGE_SIZE).min(len);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use timeline_common::{build_catalog, RepoFileEntry, SiteConfig};

    fn feed_with(paths: Vec<String>) -> TimelineFeed {
        let entries: Vec<RepoFileEntry> = paths.into_iter().map(RepoFileEntry::blob).collect();
        TimelineFeed::new(build_catalog(&entries, &SiteConfig::new("owner", "repo")))
    }

    /// 2024 年 7 月 25 篇，6 月 3 篇，另有 2 篇无法识别日期
    fn sample_feed() -> TimelineFeed {
        let mut paths: Vec<String> = (1..=25)
            .map(|d| format!("posts/2024/07/{:02}/day{}.md", d, d))
            .collect();
        paths.extend((1..=3).map(|d| format!("posts/2024/06/{:02}/june{}.txt", d, d)));
        paths.push("posts/misc/loose.md".to_string());
        paths.push("posts/drafts/idea.txt".to_string());
        feed_with(paths)
    }

    /// 回到全部日记并取第一页
    fn reset_render(feed: &mut TimelineFeed) -> FeedRender<'_> {
        feed.reset_view();
        feed.render(true)
    }

    fn titles(render: &FeedRender<'_>) -> Vec<String> {
        match render {
            FeedRender::Cards { posts, .. } => posts.iter().map(|p| p.title.clone()).collect(),
            FeedRender::Empty => Vec::new(),
        }
    }

    #[test]
    fn first_page_of_all_posts() {
        let mut feed = sample_feed();
        let render = reset_render(&mut feed);
        match &render {
            FeedRender::Cards {
                reset,
                posts,
                has_more,
            } => {
                assert!(*reset);
                assert_eq!(posts.len(), PAGE_SIZE);
                assert!(*has_more);
                assert_eq!(posts[0].title, "day25");
            }
            FeedRender::Empty => panic!("expected cards"),
        }
        assert_eq!(feed.filter().title(), "最新动态");
    }

    #[test]
    fn load_more_walks_pages_without_gaps_or_duplicates() {
        let mut feed = sample_feed();
        let total = feed.active_len();
        let mut seen = titles(&reset_render(&mut feed));

        for k in 1..=4 {
            feed.load_more();
            let render = feed.render(false);
            if let FeedRender::Cards { reset, .. } = &render {
                assert!(!*reset);
            }
            seen.extend(titles(&render));
            assert_eq!(seen.len(), ((k + 1) * PAGE_SIZE).min(total));
            assert_eq!(feed.visible_count(), seen.len());
            assert_eq!(render.shows_load_more(), feed.page_cursor() * PAGE_SIZE < total);
        }

        let unique: HashSet<&String> = seen.iter().collect();
        assert_eq!(unique.len(), total);
        let expected: Vec<String> = feed.active_posts().map(|p| p.title.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn load_more_past_the_end_appends_nothing() {
        let mut feed = feed_with(vec!["posts/2024/01/01/a.md".to_string()]);
        feed.reset_view();
        feed.load_more();
        let render = feed.render(false);
        assert_eq!(
            render,
            FeedRender::Cards {
                reset: false,
                posts: Vec::new(),
                has_more: false,
            }
        );
    }

    #[test]
    fn reset_render_is_idempotent() {
        let mut feed = sample_feed();
        feed.load_more();
        feed.rewind();
        let first = titles(&feed.render(true));
        let second = titles(&feed.render(true));
        assert_eq!(first, second);
        assert_eq!(feed.page_cursor(), 1);
    }

    #[test]
    fn filter_by_month_keeps_catalog_order() {
        let mut feed = sample_feed();
        feed.filter_by_month("2024", "06");
        let render = feed.render(true);
        assert_eq!(titles(&render), vec!["june3", "june2", "june1"]);
        assert!(!render.shows_load_more());
        assert_eq!(feed.filter().title(), "2024年 6月");

        let expected: Vec<&Post> = feed
            .catalog()
            .iter()
            .filter(|p| p.year == "2024" && p.month == "06")
            .collect();
        let active: Vec<&Post> = feed.active_posts().collect();
        assert_eq!(active, expected);
    }

    #[test]
    fn filter_then_reset_restores_everything() {
        let mut feed = sample_feed();
        feed.filter_by_month("2024", "07");
        feed.load_more();
        assert_eq!(feed.page_cursor(), 2);

        feed.reset_view();
        assert_eq!(feed.filter(), &ActiveFilter::All);
        assert_eq!(feed.page_cursor(), 1);
        assert_eq!(feed.active_len(), feed.catalog().len());
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let mut feed = sample_feed();
        feed.filter_by_month("1999", "01");
        assert_eq!(feed.render(true), FeedRender::Empty);
        assert!(!feed.has_more());
    }

    #[test]
    fn month_filter_uses_exact_strings() {
        let mut feed = sample_feed();
        feed.filter_by_month("2024", "6");
        assert_eq!(feed.render(true), FeedRender::Empty);
    }

    #[test]
    fn empty_catalog_renders_empty_state() {
        let mut feed = TimelineFeed::new(Vec::new());
        assert!(feed.is_catalog_empty());
        let render = reset_render(&mut feed);
        assert_eq!(render, FeedRender::Empty);
        assert!(!render.shows_load_more());
    }

    #[test]
    fn load_more_visibility_matches_cursor_arithmetic() {
        for count in [0usize, 1, 9, 10, 11, 20, 21] {
            let paths = (0..count)
                .map(|i| format!("posts/2024/05/01/p{}.md", i))
                .collect();
            let mut feed = feed_with(paths);
            let render = reset_render(&mut feed);
            assert_eq!(render.shows_load_more(), PAGE_SIZE < count, "count = {}", count);
        }
    }

    #[test]
    fn render_does_not_move_the_cursor() {
        let mut feed = sample_feed();
        feed.load_more();
        let render = feed.render(false);
        let shown = titles(&render);
        assert_eq!(feed.page_cursor(), 2);
        assert_eq!(feed.visible_count(), 20);
        assert!(render.shows_load_more());
        assert_eq!(shown.len(), PAGE_SIZE);
    }

    #[test]
    fn filter_serializes_as_tagged_variant() {
        let json = serde_json::to_value(ActiveFilter::by_month("2024", "07")).unwrap();
        assert_eq!(json["kind"], "byMonth");
        assert_eq!(json["month"], "07");
    }
}
