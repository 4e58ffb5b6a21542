//! JSONファイルの取得
//!
//! GETを1回だけ発行し、ステータス200ならJSONとして解析する。リトライはしない。

use detection_gallery_common::{Error, Result};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JS側の例外をエラー文字列に変換
fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// `path` を取得してデシリアライズする
///
/// # Errors
/// * `Error::Fetch` - ステータスが200以外
/// * `Error::Network` - 通信自体の失敗
/// * `Error::Format` - JSONとして読めない、または構造が違う
pub async fn load_data<T: DeserializeOwned>(path: &str) -> Result<T> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts)
        .map_err(|e| Error::Network(js_message(&e)))?;

    let window = web_sys::window()
        .ok_or_else(|| Error::Network("windowが取得できません".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| Error::Network(js_message(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| Error::Network(js_message(&e)))?;

    log::debug!("GET {} -> {}", path, resp.status());
    if resp.status() != 200 {
        return Err(Error::Fetch {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    let json_promise = resp.json().map_err(|e| Error::Format(js_message(&e)))?;
    let json = JsFuture::from(json_promise)
        .await
        .map_err(|e| Error::Format(js_message(&e)))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Format(e.to_string()))
}
