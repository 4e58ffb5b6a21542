//! 型付き要素定義からDOMを構築

use detection_gallery_common::{Action, Element, ImageSpec};
use leptos::prelude::*;

/// `Element` を1つの要素に変換
///
/// クリック時の動作は `on_action` に渡す。
pub fn build_element<F>(element: Element, on_action: F) -> AnyView
where
    F: Fn(Action) + Clone + Send + Sync + 'static,
{
    match element {
        Element::Image(spec) => build_image(spec, on_action),
        Element::LineBreak => view! { <br /> }.into_any(),
        Element::Heading(text) => view! { <h2>{text}</h2> }.into_any(),
    }
}

pub fn build_image<F>(spec: ImageSpec, on_action: F) -> AnyView
where
    F: Fn(Action) + Clone + Send + Sync + 'static,
{
    let style = spec.style().unwrap_or_default();
    let action = spec.on_click;

    view! {
        <img
            src=spec.src
            class=spec.class.unwrap_or_default()
            title=spec.title
            style=style
            on:click=move |_| {
                if let Some(action) = action {
                    on_action(action);
                }
            }
        />
    }
    .into_any()
}
