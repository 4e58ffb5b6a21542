//! Detection Gallery Web App (Leptos + WASM)

mod app;
mod components;
pub mod api;
mod element;

pub use api::load_data;

use wasm_bindgen::prelude::*;

/// ブラウザのコンソールにログを出す
///
/// 登録できた場合は `true`。既にロガーがある場合はそちらに警告を出して `false`。
pub fn init_logging() -> bool {
    match console_log::init_with_level(log::Level::Debug) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("console_log を初期化できません: {}", e);
            false
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    leptos::mount::mount_to_body(app::App);
}
