//! 通知メッセージ領域

use detection_gallery_common::{Message, MessageBus, MessageId};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;

#[component]
pub fn MessageArea<F>(
    messages: Signal<MessageBus>,
    on_dismiss: F,
) -> impl IntoView
where
    F: Fn(MessageId) + 'static + Clone + Send + Sync,
{
    view! {
        <div id="messages">
            <For
                each=move || messages.with(|bus| bus.messages().to_vec())
                key=|message| message.id
                children=move |message| {
                    view! { <MessageItem message=message on_dismiss=on_dismiss.clone() /> }
                }
            />
        </div>
    }
}

#[component]
fn MessageItem<F>(
    message: Message,
    on_dismiss: F,
) -> impl IntoView
where
    F: Fn(MessageId) + 'static + Clone + Send + Sync,
{
    let id = message.id;

    // 自動消去。クリックで先に消えていても dismiss は何もしない
    if let Some(seconds) = message.auto_dismiss {
        let on_timeout = on_dismiss.clone();
        Timeout::new(seconds.saturating_mul(1000), move || on_timeout(id)).forget();
    }

    view! {
        <div class=message.kind.as_str() on:click=move |_| on_dismiss(id)>
            {message.text}
        </div>
    }
}
