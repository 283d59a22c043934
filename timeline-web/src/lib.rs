use std::cell::RefCell;
use std::rc::Rc;

use timeline_common::{Post, SiteConfig, TimelineError};
use timeline_feed::{NavigationIndex, TimelineFeed};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget};

pub mod api;
pub mod dom;
pub mod log;
pub mod startup;
pub mod viewer;

use dom::Page;
use viewer::{PostViewer, LOADING_HTML};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 页面中存放配置的全局对象名
pub const CONFIG_GLOBAL: &str = "NOTETIME_CONFIG";

type SharedApp = Rc<RefCell<App>>;

/// 应用状态，所有修改都经由时间线和弹窗的操作完成
pub struct App {
    feed: TimelineFeed,
    viewer: PostViewer,
    page: Page,
}

enum FeedAction {
    Reset,
    Month { year: String, month: String },
    LoadMore,
}

/// WASM 入口：查找页面元素后开始加载
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    match Page::attach() {
        Ok(page) => spawn_local(run(page)),
        Err(e) => web_sys::console::error_2(&JsValue::from_str("页面初始化失败:"), &e),
    }
}

async fn run(page: Page) {
    let started = log::now_ms();

    match load_catalog().await {
        Ok(catalog) => {
            log::info(&format!(
                "加载完成，共 {} 篇日记，耗时 {:.0} 毫秒",
                catalog.len(),
                log::now_ms() - started
            ));
            let app = Rc::new(RefCell::new(App {
                feed: TimelineFeed::new(catalog),
                viewer: PostViewer::new(),
                page,
            }));
            if let Err(e) = mount(&app) {
                web_sys::console::error_2(&JsValue::from_str("界面渲染失败:"), &e);
            }
        }
        Err(error) => {
            log::error(&format!("Init Error: {:?}", error));
            if let Err(e) = page.show_error(&error) {
                web_sys::console::error_1(&e);
            }
        }
    }
}

/// 读取配置 -> 获取文件列表 -> 生成目录，严格按顺序执行
async fn load_catalog() -> Result<Vec<Post>, TimelineError> {
    let config = load_config()?;
    startup::bootstrap(&config, || api::list_post_files(&config)).await
}

/// 读取页面脚本设置的 `window.NOTETIME_CONFIG`
fn load_config() -> Result<SiteConfig, TimelineError> {
    let window = web_sys::window().ok_or(TimelineError::ConfigMissing)?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|_| TimelineError::ConfigMissing)?;
    if value.is_undefined() || value.is_null() {
        log::warn(&format!("未找到 window.{}，使用模板默认配置", CONFIG_GLOBAL));
        return Ok(SiteConfig::default());
    }

    serde_wasm_bindgen::from_value(value).map_err(|e| {
        log::error(&format!("站点配置格式错误: {}", e));
        TimelineError::ConfigMissing
    })
}

/// 首次渲染并绑定事件
fn mount(app: &SharedApp) -> Result<(), JsValue> {
    {
        let mut guard = app.borrow_mut();
        let state = &mut *guard;
        if state.feed.is_catalog_empty() {
            state.page.show_empty_catalog()?;
        } else {
            state
                .page
                .render_calendar(&NavigationIndex::build(state.feed.catalog()))?;
            state.apply(FeedAction::Reset)?;
        }
    }
    bind_events(app)
}

impl App {
    fn apply(&mut self, action: FeedAction) -> Result<(), JsValue> {
        let reset = match action {
            FeedAction::Reset => {
                self.feed.reset_view();
                true
            }
            FeedAction::Month { year, month } => {
                self.feed.filter_by_month(&year, &month);
                true
            }
            FeedAction::LoadMore => {
                self.feed.load_more();
                false
            }
        };
        self.page.render_feed(&self.feed.render(reset))?;

        if reset {
            self.page.set_title(&self.feed.filter().title());
            self.page.highlight_month(self.feed.filter())?;
        }
        Ok(())
    }

    /// 关闭弹窗；未返回的请求不作废，下次打开会重新请求
    fn close_post(&self) -> Result<(), JsValue> {
        self.page.hide_modal()
    }
}

/// 打开日记详情；先显示加载提示，内容返回后再替换
fn open_post(app: &SharedApp, path: &str) -> Result<(), JsValue> {
    let ticket = {
        let mut guard = app.borrow_mut();
        let state = &mut *guard;
        let Some(post) = state.feed.catalog().iter().find(|p| p.path == path) else {
            log::warn(&format!("找不到日记: {}", path));
            return Ok(());
        };
        let ticket = state.viewer.open(post);
        state.page.set_modal_html(LOADING_HTML);
        state.page.show_modal()?;
        ticket
    };

    let app = Rc::clone(app);
    spawn_local(async move {
        let fetched = api::fetch_raw(&ticket.url).await;
        if let Err(error) = &fetched {
            log::error(&format!("{:?}", error));
        }

        let state = app.borrow();
        match state.viewer.deliver(&ticket, fetched) {
            Some(html) => state.page.set_modal_html(&html),
            None => log::info(&format!("忽略过期的内容响应: {}", ticket.url)),
        }
    });
    Ok(())
}

fn bind_events(app: &SharedApp) -> Result<(), JsValue> {
    let (calendar, feed, load_more, close_button) = {
        let state = app.borrow();
        (
            state.page.calendar.clone(),
            state.page.feed.clone(),
            state.page.load_more.clone(),
            state.page.close_button.clone(),
        )
    };

    {
        let app = Rc::clone(app);
        listen(&calendar, "click", move |event| {
            let Some(target) = closest(&event, ".year-title, .month-item") else {
                return;
            };
            let result = match target.get_attribute("data-action").as_deref() {
                Some("all") => app.borrow_mut().apply(FeedAction::Reset),
                Some("toggle") => app.borrow().page.toggle_year(&target),
                _ => match (target.get_attribute("data-year"), target.get_attribute("data-month")) {
                    (Some(year), Some(month)) => app.borrow_mut().apply(FeedAction::Month { year, month }),
                    _ => Ok(()),
                },
            };
            report(result);
        })?;
    }

    {
        let app = Rc::clone(app);
        listen(&feed, "click", move |event| {
            if let Some(path) = closest(&event, ".post-card").and_then(|card| card.get_attribute("data-path")) {
                report(open_post(&app, &path));
            }
        })?;
    }

    {
        let app = Rc::clone(app);
        listen(&load_more, "click", move |_| {
            report(app.borrow_mut().apply(FeedAction::LoadMore));
        })?;
    }

    {
        let app = Rc::clone(app);
        listen(&close_button, "click", move |_| {
            report(app.borrow().close_post());
        })?;
    }

    // 点击弹窗外的遮罩也会关闭
    {
        let app = Rc::clone(app);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("无法访问 window"))?;
        listen(&window, "click", move |event| {
            let on_backdrop = {
                let state = app.borrow();
                let modal: &JsValue = state.page.modal.as_ref();
                event.target().map_or(false, |target| JsValue::from(target) == *modal)
            };
            if on_backdrop {
                report(app.borrow().close_post());
            }
        })?;
    }

    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        web_sys::console::error_1(&e);
    }
}
