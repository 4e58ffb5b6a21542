//! サムネイルサイズ

use crate::components::pager::parse_slider_value;
use detection_gallery_common::ModeView;
use leptos::prelude::*;

#[component]
pub fn SizeSlider<F>(
    gallery: Memo<Option<ModeView>>,
    on_zoom: F,
) -> impl IntoView
where
    F: Fn(usize) + 'static + Clone + Send + Sync,
{
    let size_no = move || gallery.with(|v| v.as_ref().map(|v| v.image_size_no).unwrap_or(1));
    let max_size_no = move || gallery.with(|v| v.as_ref().map(|v| v.max_image_size_no).unwrap_or(0));
    let size_px = move || gallery.with(|v| v.as_ref().map(|v| v.image_size).unwrap_or(0));

    view! {
        <label class="size">
            "Size"
            <input
                type="range"
                id="size-slider"
                min="0"
                max=move || max_size_no().to_string()
                prop:value=move || size_no().to_string()
                title=move || format!("Size: {}", size_px())
                on:input=move |ev| {
                    if let Some(size_no) = parse_slider_value(&event_target_value(&ev)) {
                        on_zoom(size_no);
                    }
                }
            />
        </label>
    }
}
