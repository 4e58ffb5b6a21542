//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api::load_data;
use crate::components::{
    header::Header,
    mode_buttons::ModeButtons,
    filter_panel::FilterPanel,
    pager::Pager,
    size_slider::SizeSlider,
    image_grid::ImageGrid,
    magnified::MagnifiedOverlay,
    messages::MessageArea,
};
use detection_gallery_common::{
    Action, AppState, Filters, GalleryConfig, MessageId, ModeName, Phase, Screenshot, SimilarsMap,
};

/// 起動時の読み込み
///
/// data.json を読み込んでからモードを構築し、読めた場合のみ nn.json を取りに行く。
async fn load_all(state: RwSignal<AppState>) {
    let config = state.with_untracked(|s| s.config().clone());

    let dataset = load_data::<Vec<Screenshot>>(&config.data_path).await;
    state.update(|s| s.dataset_loaded(dataset));

    if !state.with_untracked(AppState::wants_similars) {
        return;
    }

    let similars = load_data::<SimilarsMap>(&config.nn_path).await;
    state.update(|s| s.similars_loaded(similars));
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let state = RwSignal::new(AppState::new(GalleryConfig::default()));

    spawn_local(load_all(state));

    let gallery = Memo::new(move |_| state.with(AppState::render));
    let active = Signal::derive(move || state.with(AppState::active_name));
    let filters = Signal::derive(move || state.with(AppState::filters));
    let messages = Signal::derive(move || state.with(|s| s.messages().clone()));
    let is_loading = move || state.with(|s| matches!(s.phase(), Phase::Loading));

    view! {
        <div class="container">
            <Header />

            <div id="controls">
                <ModeButtons
                    active=active
                    on_switch=move |name: ModeName| state.update(|s| s.switch_mode(name))
                />
                <FilterPanel
                    filters=filters
                    on_change=move |f: Filters| state.update(|s| s.set_filters(f))
                />
                <SizeSlider
                    gallery=gallery
                    on_zoom=move |n: usize| state.update(|s| s.set_zoom(n))
                />
                <Pager
                    gallery=gallery
                    on_prev=move |_: ()| state.update(|s| s.prev_page())
                    on_next=move |_: ()| state.update(|s| s.next_page())
                    on_page=move |n: usize| state.update(|s| s.set_page(n))
                />
            </div>

            <Show when=is_loading>
                <p class="text-muted">"Loading..."</p>
            </Show>

            <ImageGrid
                gallery=gallery
                on_action=move |action: Action| state.update(|s| s.dispatch(action))
            />

            <MagnifiedOverlay
                gallery=gallery
                on_action=move |action: Action| state.update(|s| s.dispatch(action))
            />

            <MessageArea
                messages=messages
                on_dismiss=move |id: MessageId| state.update(|s| {
                    s.dismiss_message(id);
                })
            />
        </div>
    }
}
