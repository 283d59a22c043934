use timeline_common::{Post, TimelineError};
use timeline_feed::{month_label, ActiveFilter, FeedRender, NavigationIndex};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::viewer::escape_html;

pub const EMPTY_CATALOG_HTML: &str =
    "<p class=\"empty-message\">没有找到日记文件。请确认 posts 文件夹下有 .md 或 .txt 文件。</p>";
pub const EMPTY_VIEW_HTML: &str = "<p class=\"empty-message\">暂无日记。</p>";

/// 页面上需要操作的元素
pub struct Page {
    document: Document,
    pub feed: Element,
    pub load_more: HtmlElement,
    pub calendar: Element,
    pub view_title: Element,
    pub modal: HtmlElement,
    pub modal_body: Element,
    pub close_button: Element,
}

impl Page {
    /// 查找页面骨架中的固定元素
    pub fn attach() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("无法访问 document"))?;

        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("页面缺少元素 #{}", id)))
        };

        let feed = by_id("timeline-feed")?;
        let load_more = by_id("load-more-btn")?.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        let calendar = by_id("calendar-tree")?;
        let view_title = by_id("current-view-title")?;
        let modal = by_id("post-modal")?.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        let modal_body = by_id("modal-body")?;
        let close_button = document
            .query_selector(".close-modal")?
            .ok_or_else(|| JsValue::from_str("页面缺少元素 .close-modal"))?;

        Ok(Self {
            document,
            feed,
            load_more,
            calendar,
            view_title,
            modal,
            modal_body,
            close_button,
        })
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(class);
        Ok(element)
    }

    fn set_load_more_visible(&self, visible: bool) -> Result<(), JsValue> {
        let display = if visible { "inline-block" } else { "none" };
        self.load_more.style().set_property("display", display)
    }

    /// 启动失败时在主区域显示错误
    pub fn show_error(&self, error: &TimelineError) -> Result<(), JsValue> {
        self.feed.set_inner_html(&format!(
            "<div class=\"error-message\">{}</div>",
            escape_html(&error.to_string())
        ));
        self.set_load_more_visible(false)
    }

    pub fn show_empty_catalog(&self) -> Result<(), JsValue> {
        self.feed.set_inner_html(EMPTY_CATALOG_HTML);
        self.set_load_more_visible(false)
    }

    pub fn set_title(&self, title: &str) {
        self.view_title.set_text_content(Some(title));
    }

    /// 绘制一次时间线渲染结果
    pub fn render_feed(&self, render: &FeedRender<'_>) -> Result<(), JsValue> {
        match render {
            FeedRender::Empty => {
                self.feed.set_inner_html(EMPTY_VIEW_HTML);
                self.set_load_more_visible(false)
            }
            FeedRender::Cards {
                reset,
                posts,
                has_more,
            } => {
                if *reset {
                    self.feed.set_inner_html("");
                }
                for post in posts {
                    let card = self.card(post)?;
                    self.feed.append_child(&card)?;
                }
                self.set_load_more_visible(*has_more)
            }
        }
    }

    fn card(&self, post: &Post) -> Result<Element, JsValue> {
        let card = self.create("div", "post-card")?;
        card.set_attribute("data-path", &post.path)?;

        let meta = self.create("div", "post-meta")?;
        meta.set_inner_html(&format!(
            "<i class=\"far fa-clock\"></i> {}",
            escape_html(&post.display_date)
        ));
        let title = self.create("h3", "post-title")?;
        title.set_text_content(Some(&post.title));
        let preview = self.create("div", "post-preview")?;
        preview.set_text_content(Some("点击阅读全文..."));

        card.append_child(&meta)?;
        card.append_child(&title)?;
        card.append_child(&preview)?;
        Ok(card)
    }

    /// 绘制左侧日历：全部按钮 + 可折叠的年份分组
    pub fn render_calendar(&self, index: &NavigationIndex) -> Result<(), JsValue> {
        self.calendar.set_inner_html("");

        let all_group = self.create("div", "year-group")?;
        let all_title = self.create("div", "year-title")?;
        all_title.set_attribute("data-action", "all")?;
        all_title.set_text_content(Some(&index.view_all_label()));
        all_group.append_child(&all_title)?;
        self.calendar.append_child(&all_group)?;

        for group in index.year_groups() {
            let year_group = self.create("div", "year-group")?;

            let year_title = self.create("div", "year-title")?;
            year_title.set_attribute("data-action", "toggle")?;
            year_title.set_inner_html(&format!(
                "{} <span><i class=\"fas fa-chevron-down\"></i></span>",
                escape_html(&group.label())
            ));

            let month_list = self.create("div", "month-list")?;
            for month in &group.months {
                let item = self.create("div", "month-item")?;
                item.set_attribute("data-year", &group.year)?;
                item.set_attribute("data-month", month)?;
                item.set_text_content(Some(&month_label(month)));
                month_list.append_child(&item)?;
            }

            year_group.append_child(&year_title)?;
            year_group.append_child(&month_list)?;
            self.calendar.append_child(&year_group)?;
        }
        Ok(())
    }

    /// 只高亮当前筛选的月份
    pub fn highlight_month(&self, filter: &ActiveFilter) -> Result<(), JsValue> {
        let items = self.calendar.query_selector_all(".month-item")?;
        for i in 0..items.length() {
            let Some(item) = items.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            let selected = match filter {
                ActiveFilter::All => false,
                ActiveFilter::ByMonth { year, month } => {
                    item.get_attribute("data-year").as_deref() == Some(year.as_str())
                        && item.get_attribute("data-month").as_deref() == Some(month.as_str())
                }
            };
            if selected {
                item.class_list().add_1("active")?;
            } else {
                item.class_list().remove_1("active")?;
            }
        }
        Ok(())
    }

    /// 展开或收起某一年的月份列表
    pub fn toggle_year(&self, year_title: &Element) -> Result<(), JsValue> {
        let Some(list) = year_title.next_element_sibling() else {
            return Ok(());
        };
        let expanded = list.class_list().toggle("active")?;

        if let Some(icon) = year_title.query_selector("i")? {
            let (from, to) = if expanded {
                ("fa-chevron-down", "fa-chevron-up")
            } else {
                ("fa-chevron-up", "fa-chevron-down")
            };
            icon.class_list().remove_1(from)?;
            icon.class_list().add_1(to)?;
        }
        Ok(())
    }

    pub fn set_modal_html(&self, html: &str) {
        self.modal_body.set_inner_html(html);
    }

    pub fn show_modal(&self) -> Result<(), JsValue> {
        self.modal.style().set_property("display", "block")
    }

    pub fn hide_modal(&self) -> Result<(), JsValue> {
        self.modal.style().set_property("display", "none")
    }
}
