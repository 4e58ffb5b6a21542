//! 表示フィルタのチェックボックス

use detection_gallery_common::Filters;
use leptos::prelude::*;

#[component]
pub fn FilterPanel<F>(
    filters: Signal<Filters>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(Filters) + 'static + Clone + Send + Sync,
{
    // 1つ変わったら3つ全部を読み直して渡す
    let toggle = move |update: fn(&mut Filters, bool)| {
        let on_change = on_change.clone();
        move |ev| {
            let mut next = filters.get_untracked();
            update(&mut next, event_target_checked(&ev));
            on_change(next);
        }
    };

    view! {
        <div class="filters">
            <label>
                <input
                    type="checkbox"
                    id="all-cb"
                    prop:checked=move || filters.get().show_all
                    on:change=toggle(|f, v| f.show_all = v)
                />
                "All"
            </label>
            <label class="fp">
                <input
                    type="checkbox"
                    id="fp-cb"
                    prop:checked=move || filters.get().show_fp
                    on:change=toggle(|f, v| f.show_fp = v)
                />
                "False positives"
            </label>
            <label class="fn">
                <input
                    type="checkbox"
                    id="fn-cb"
                    prop:checked=move || filters.get().show_fn
                    on:change=toggle(|f, v| f.show_fn = v)
                />
                "False negatives"
            </label>
        </div>
    }
}
