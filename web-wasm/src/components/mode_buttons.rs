//! モード切替ボタン

use detection_gallery_common::ModeName;
use leptos::prelude::*;

#[component]
pub fn ModeButtons<F>(
    active: Signal<Option<ModeName>>,
    on_switch: F,
) -> impl IntoView
where
    F: Fn(ModeName) + 'static + Clone + Send + Sync,
{
    view! {
        <div id="mode-buttons">
            {ModeName::ALL
                .into_iter()
                .map(|name| {
                    let on_switch = on_switch.clone();
                    view! {
                        <button
                            id=name.button_id()
                            class=move || if active.get() == Some(name) { "" } else { "off" }
                            on:click=move |_| on_switch(name)
                        >
                            {name.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
