//! 浏览器控制台输出
use wasm_bindgen::JsValue;
use web_sys::console;

pub fn info(message: &str) {
    console::log_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}

pub fn error(message: &str) {
    console::error_1(&JsValue::from_str(message));
}

/// 页面打开以来的毫秒数，用于统计耗时
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
