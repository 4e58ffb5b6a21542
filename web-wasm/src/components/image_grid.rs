//! サムネイル一覧

use crate::element::build_image;
use detection_gallery_common::{Action, ModeView};
use leptos::prelude::*;

/// 現在ページのサムネイルを毎回すべて描き直す
#[component]
pub fn ImageGrid<F>(
    gallery: Memo<Option<ModeView>>,
    on_action: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    view! {
        <div id="images">
            {move || {
                let on_action = on_action.clone();
                gallery.get().map(|view| {
                    view.thumbnails
                        .into_iter()
                        .map(|spec| build_image(spec, on_action.clone()))
                        .collect_view()
                })
            }}
        </div>
    }
}
