//! アプリケーション状態
//!
//! 読み込み状況・両モード・現在のモード・チェックボックスの値・通知をまとめて持つ。
//! イベントハンドラはこの構造体を更新し、描画は `render` の結果だけを見る。

use crate::config::GalleryConfig;
use crate::element::Action;
use crate::error::Error;
use crate::filter::Filters;
use crate::messages::{MessageBus, MessageId, MessageKind};
use crate::mode::{
    DetectionsMode, Mode, ModeControl, ModeName, ModeView, ScreenshotsMode,
};
use crate::types::{Screenshot, SimilarsMap};
use std::sync::Arc;

/// 読み込み済みの両モード
#[derive(Debug, Clone)]
pub struct Modes {
    pub screenshots: Mode<ScreenshotsMode>,
    pub detections: Mode<DetectionsMode>,
    active: ModeName,
}

impl Modes {
    pub fn new(screenshots: Vec<Screenshot>) -> Self {
        let shared: Arc<[Screenshot]> = screenshots.into();
        Self {
            screenshots: Mode::new(ScreenshotsMode::new(Arc::clone(&shared))),
            detections: Mode::new(DetectionsMode::new(shared)),
            active: ModeName::Screenshots,
        }
    }

    pub fn active_name(&self) -> ModeName {
        self.active
    }

    pub fn get(&self, name: ModeName) -> &dyn ModeControl {
        match name {
            ModeName::Screenshots => &self.screenshots,
            ModeName::Detections => &self.detections,
        }
    }

    pub fn get_mut(&mut self, name: ModeName) -> &mut dyn ModeControl {
        match name {
            ModeName::Screenshots => &mut self.screenshots,
            ModeName::Detections => &mut self.detections,
        }
    }

    pub fn active(&self) -> &dyn ModeControl {
        self.get(self.active)
    }

    pub fn active_mut(&mut self) -> &mut dyn ModeControl {
        self.get_mut(self.active)
    }
}

/// 読み込み状況
#[derive(Debug, Clone)]
pub enum Phase {
    /// data.json 取得中（まだどのモードも有効でない）
    Loading,
    /// data.json の取得に失敗（モードは有効にならない）
    Unavailable,
    Ready(Box<Modes>),
}

#[derive(Debug, Clone)]
pub struct AppState {
    config: GalleryConfig,
    phase: Phase,
    /// チェックボックスの値
    filters: Filters,
    messages: MessageBus,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GalleryConfig::default())
    }
}

impl AppState {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            filters: Filters::default(),
            messages: MessageBus::default(),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn modes(&self) -> Option<&Modes> {
        match &self.phase {
            Phase::Ready(modes) => Some(modes.as_ref()),
            _ => None,
        }
    }

    pub fn modes_mut(&mut self) -> Option<&mut Modes> {
        match &mut self.phase {
            Phase::Ready(modes) => Some(modes.as_mut()),
            _ => None,
        }
    }

    pub fn active_name(&self) -> Option<ModeName> {
        self.modes().map(Modes::active_name)
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn messages(&self) -> &MessageBus {
        &self.messages
    }

    pub fn notify(&mut self, kind: MessageKind, text: impl Into<String>, auto_dismiss: Option<u32>) -> MessageId {
        self.messages.show(kind, text, auto_dismiss)
    }

    pub fn dismiss_message(&mut self, id: MessageId) -> bool {
        self.messages.dismiss(id)
    }

    // =============================================
    // 読み込み
    // =============================================

    /// data.json の取得結果を反映する
    ///
    /// 成功時は両モードを構築してスクリーンショットモードを有効化する。
    /// 失敗時はエラー通知を出し、どのモードも有効にしない。
    pub fn dataset_loaded(&mut self, result: Result<Vec<Screenshot>, Error>) {
        match result {
            Ok(screenshots) => {
                log::info!("{}: {}枚のスクリーンショット", self.config.data_path, screenshots.len());
                self.phase = Phase::Ready(Box::new(Modes::new(screenshots)));
                self.switch_mode(ModeName::Screenshots);
            }
            Err(e) => {
                self.phase = Phase::Unavailable;
                let text = format!("Can't load {}: {}", self.config.data_path, e.status_text());
                self.messages.show(MessageKind::Error, text, None);
            }
        }
    }

    /// nn.json を取得すべきか（data.json が読めた場合のみ）
    pub fn wants_similars(&self) -> bool {
        self.modes().is_some()
    }

    /// nn.json の取得結果を反映する
    ///
    /// 失敗しても検出モードはそのまま使える（警告のみ）。
    pub fn similars_loaded(&mut self, result: Result<SimilarsMap, Error>) {
        let Phase::Ready(modes) = &mut self.phase else {
            return;
        };

        let seconds = Some(self.config.warning_seconds);
        match result {
            Ok(similars) => {
                modes.detections.kind_mut().set_similars(&similars);
            }
            Err(e) if e.is_transport() => {
                let text = format!(
                    "Can't load {}: {}. Will proceed without similarity data.",
                    self.config.nn_path,
                    e.status_text()
                );
                self.messages.show(MessageKind::Warning, text, seconds);
            }
            Err(e) => {
                let text = format!(
                    "Similarity data from {} has wrong format: {}",
                    self.config.nn_path, e
                );
                self.messages.show(MessageKind::Warning, text, seconds);
            }
        }
    }

    // =============================================
    // 操作
    // =============================================

    /// モード切替。拡大表示は必ず先に閉じる
    pub fn switch_mode(&mut self, name: ModeName) {
        let filters = self.filters;
        let Some(modes) = self.modes_mut() else {
            return;
        };

        modes.active_mut().unmagnify();
        modes.active = name;
        modes.active_mut().activate(filters);
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        if let Some(modes) = self.modes_mut() {
            modes.active_mut().set_filters(filters);
        }
    }

    pub fn next_page(&mut self) {
        self.with_active(|mode| mode.next_page());
    }

    pub fn prev_page(&mut self) {
        self.with_active(|mode| mode.prev_page());
    }

    pub fn set_page(&mut self, page_no: usize) {
        self.with_active(|mode| mode.set_page(page_no));
    }

    pub fn set_zoom(&mut self, image_size_no: usize) {
        self.with_active(|mode| mode.set_zoom(image_size_no));
    }

    /// 描画要素のクリック
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Magnify(position) => self.with_active(|mode| {
                mode.magnify(position);
            }),
            Action::Unmagnify => self.with_active(|mode| mode.unmagnify()),
        }
    }

    fn with_active<F>(&mut self, f: F)
    where
        F: FnOnce(&mut dyn ModeControl),
    {
        if let Some(modes) = self.modes_mut() {
            f(modes.active_mut());
        }
    }

    /// 現在のモードの描画状態。モードが有効でなければ None
    pub fn render(&self) -> Option<ModeView> {
        self.modes().map(|modes| modes.active().render())
    }
}
