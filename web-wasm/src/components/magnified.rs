//! 拡大表示オーバーレイ

use crate::element::build_element;
use detection_gallery_common::{Action, ModeView};
use leptos::prelude::*;

#[component]
pub fn MagnifiedOverlay<F>(
    gallery: Memo<Option<ModeView>>,
    on_action: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let is_open = move || gallery.with(|v| v.as_ref().is_some_and(|v| v.magnified.is_some()));
    let on_close = on_action.clone();

    view! {
        <div
            id="magnified"
            tabindex="-1"
            style=move || if is_open() { "display:block" } else { "display:none" }
            on:click=move |_| on_close(Action::Unmagnify)
        >
            {move || {
                let on_action = on_action.clone();
                gallery
                    .get()
                    .and_then(|view| view.magnified)
                    .map(|magnified| {
                        magnified
                            .elements
                            .into_iter()
                            .map(|element| build_element(element, on_action.clone()))
                            .collect_view()
                    })
            }}
        </div>
    }
}
