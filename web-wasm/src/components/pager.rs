//! ページ送り

use detection_gallery_common::ModeView;
use leptos::prelude::*;

/// スライダーの値を数値に変換
pub fn parse_slider_value(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

#[component]
pub fn Pager<FP, FN, FS>(
    gallery: Memo<Option<ModeView>>,
    on_prev: FP,
    on_next: FN,
    on_page: FS,
) -> impl IntoView
where
    FP: Fn(()) + 'static + Clone + Send + Sync,
    FN: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(usize) + 'static + Clone + Send + Sync,
{
    let page_no = move || gallery.with(|v| v.as_ref().map(|v| v.page_no).unwrap_or(1));
    let max_page_no = move || gallery.with(|v| v.as_ref().map(|v| v.max_page_no).unwrap_or(1));
    let visible = move || gallery.with(|v| v.as_ref().is_some_and(|v| v.pager_visible));

    view! {
        <div id="pager" style=move || if visible() { "" } else { "display:none" }>
            <button
                id="prev"
                disabled=move || !gallery.with(|v| v.as_ref().is_some_and(|v| v.prev_enabled))
                on:click=move |_| on_prev(())
            >
                "◀"
            </button>
            <span id="page-no">{page_no}</span>
            <button
                id="next"
                disabled=move || !gallery.with(|v| v.as_ref().is_some_and(|v| v.next_enabled))
                on:click=move |_| on_next(())
            >
                "▶"
            </button>
            <input
                type="range"
                id="page-slider"
                min="1"
                max=move || max_page_no().to_string()
                prop:value=move || page_no().to_string()
                title=move || format!("Page: {}", page_no())
                on:input=move |ev| {
                    if let Some(page) = parse_slider_value(&event_target_value(&ev)) {
                        on_page(page);
                    }
                }
            />
        </div>
    }
}
