//! 日记详情弹窗的状态与内容渲染。
//!
//! 每次打开都会领取一张新的 [`ViewTicket`]；请求返回时如果票据已过期
//! （期间又打开了别的日记），结果直接丢弃，不会覆盖新的内容。

use comrak::options::Options;
use timeline_common::{FileType, Post, TimelineError};

pub const LOADING_HTML: &str = "<p>加载中...</p>";

/// 弹窗状态，内容不缓存，每次打开都会重新请求
#[derive(Debug, Default)]
pub struct PostViewer {
    generation: u64,
}

/// 一次打开请求的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
    pub url: String,
    pub file_type: FileType,
}

impl PostViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开日记，之前尚未返回的请求随之失效
    pub fn open(&mut self, post: &Post) -> ViewTicket {
        self.generation += 1;
        ViewTicket {
            generation: self.generation,
            url: post.content_url.clone(),
            file_type: post.file_type,
        }
    }

    /// 票据是否仍对应最近一次打开
    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        ticket.generation == self.generation
    }

    /// 请求返回后决定弹窗内容；票据过期时返回 `None`，调用方不做任何修改
    pub fn deliver(
        &self,
        ticket: &ViewTicket,
        fetched: Result<String, TimelineError>,
    ) -> Option<String> {
        if !self.is_current(ticket) {
            return None;
        }
        Some(match fetched {
            Ok(content) => render_body(ticket.file_type, &content),
            Err(error) => failure_html(&error),
        })
    }
}

/// 根据文件类型渲染正文
pub fn render_body(file_type: FileType, content: &str) -> String {
    match file_type {
        FileType::Markdown => format!(
            "<div class=\"markdown-body\">{}</div>",
            comrak::markdown_to_html(content, &markdown_options())
        ),
        // 保留换行、空格和缩进
        FileType::Plaintext => format!(
            "<div class=\"text-content\"><pre>{}</pre></div>",
            escape_html(content)
        ),
    }
}

/// 获取失败时替换加载提示的内容
pub fn failure_html(error: &TimelineError) -> String {
    format!("<p>{}</p>", escape_html(&error.to_string()))
}

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// GitHub 风格的扩展；源文件中的原始 HTML 不会输出
fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;
    ext.cjk_friendly_emphasis = true;
    options.render.github_pre_lang = true;
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_common::{build_post, RepoFileEntry, SiteConfig};

    fn post(path: &str) -> Post {
        build_post(&RepoFileEntry::blob(path), &SiteConfig::new("owner", "repo")).unwrap()
    }

    #[test]
    fn newer_open_invalidates_pending_ticket() {
        let mut viewer = PostViewer::new();
        let first = viewer.open(&post("posts/2024/07/05-Friday/a.md"));
        let second = viewer.open(&post("posts/2024/07/06-Saturday/b.txt"));

        assert!(!viewer.is_current(&first));
        assert!(viewer.is_current(&second));
        assert_eq!(second.file_type, FileType::Plaintext);
        assert!(second.url.ends_with("/posts/2024/07/06-Saturday/b.txt"));
    }

    #[test]
    fn reopening_same_post_issues_fresh_ticket() {
        let mut viewer = PostViewer::new();
        let target = post("posts/2024/07/05/a.md");
        let first = viewer.open(&target);
        let again = viewer.open(&target);
        assert_ne!(first, again);
        assert!(!viewer.is_current(&first));
        assert!(viewer.is_current(&again));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut viewer = PostViewer::new();
        let first = viewer.open(&post("posts/2024/07/05/a.md"));
        let _second = viewer.open(&post("posts/2024/07/06/b.md"));

        assert_eq!(viewer.deliver(&first, Ok("# late".into())), None);
        let failed = Err(TimelineError::ContentFetchFailed {
            url: first.url.clone(),
            reason: "HTTP 500".into(),
        });
        assert_eq!(viewer.deliver(&first, failed), None);
    }

    #[test]
    fn current_response_is_rendered_by_file_type() {
        let mut viewer = PostViewer::new();
        let ticket = viewer.open(&post("posts/2024/07/05/a.txt"));
        let html = viewer.deliver(&ticket, Ok("<i>x</i>".into()));
        assert_eq!(
            html.as_deref(),
            Some("<div class=\"text-content\"><pre>&lt;i&gt;x&lt;/i&gt;</pre></div>")
        );

        let ticket = viewer.open(&post("posts/2024/07/05/a.md"));
        let html = viewer.deliver(&ticket, Ok("**晴**".into())).unwrap_or_default();
        assert!(html.contains("<strong>晴</strong>"));
    }

    #[test]
    fn current_failure_replaces_loading_text() {
        let mut viewer = PostViewer::new();
        let ticket = viewer.open(&post("posts/2024/07/05/a.md"));
        let failed = Err(TimelineError::ContentFetchFailed {
            url: ticket.url.clone(),
            reason: "network".into(),
        });
        assert_eq!(
            viewer.deliver(&ticket, failed).as_deref(),
            Some("<p>加载内容失败。请检查文件路径或网络。</p>")
        );
    }

    #[test]
    fn plaintext_is_escaped_and_preformatted() {
        let html = render_body(FileType::Plaintext, "  <b>hi</b> & \"bye\"\n\tend");
        assert_eq!(
            html,
            "<div class=\"text-content\"><pre>  &lt;b&gt;hi&lt;/b&gt; &amp; &quot;bye&quot;\n\tend</pre></div>"
        );
    }

    #[test]
    fn markdown_is_rendered() {
        let html = render_body(FileType::Markdown, "# 今天\n\n**晴**，~~雨~~");
        assert!(html.starts_with("<div class=\"markdown-body\">"));
        assert!(html.contains("<h1>今天</h1>"));
        assert!(html.contains("<strong>晴</strong>"));
        assert!(html.contains("<del>雨</del>"));
    }

    #[test]
    fn markdown_drops_raw_html() {
        let html = render_body(FileType::Markdown, "<script>alert(1)</script>\n\ntext");
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>text</p>"));
    }

    #[test]
    fn failure_message() {
        let error = TimelineError::ContentFetchFailed {
            url: "https://raw.githubusercontent.com/x".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(failure_html(&error), "<p>加载内容失败。请检查文件路径或网络。</p>");
    }
}
