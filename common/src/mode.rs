//! 表示モード
//!
//! フィルタ・ページ送り・サムネイルサイズの3軸を持つ状態機械。
//! - `ModeKind`: モードごとの差分（画像一覧、フィルタ条件、拡大表示）
//! - `Mode<K>`: 共通の状態と操作
//! - `ModeControl`: モード種別を問わず操作するためのトレイト

use crate::detection::{flatten_detections, DetectionKind, DetectionRecord};
use crate::element::{Action, Element, ImageSpec, Magnified};
use crate::filter::{FilterCache, Filters};
use crate::types::{Screenshot, SimilarsMap};
use std::sync::Arc;

/// モード名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeName {
    Screenshots,
    Detections,
}

impl ModeName {
    pub const ALL: [ModeName; 2] = [ModeName::Screenshots, ModeName::Detections];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeName::Screenshots => "screenshots",
            ModeName::Detections => "detections",
        }
    }

    /// モード切替ボタンのid
    pub fn button_id(&self) -> String {
        format!("mode-{}", self.as_str())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModeName::Screenshots => "Screenshots",
            ModeName::Detections => "Detections",
        }
    }
}

/// モードごとの差分
pub trait ModeKind {
    type Item;

    const NAME: ModeName;
    /// サムネイル高さの候補(px)
    const IMAGE_SIZES: &'static [u32];
    const PAGE_SIZE: usize;

    fn images(&self) -> &[Self::Item];

    /// 画像のファイルパス
    fn src(item: &Self::Item) -> &str;

    /// 表示対象のインデックス一覧。既定はフィルタしない
    fn filter_images(&self, _filters: Filters) -> Vec<usize> {
        (0..self.images().len()).collect()
    }

    fn thumbnail(&self, item: &Self::Item) -> ImageSpec {
        ImageSpec::new(Self::src(item))
    }

    fn magnify(&self, item: &Self::Item) -> Magnified {
        Magnified::single(Self::src(item))
    }
}

/// 描画に必要な状態一式
#[derive(Debug, Clone, PartialEq)]
pub struct ModeView {
    pub name: ModeName,
    pub thumbnails: Vec<ImageSpec>,
    pub page_no: usize,
    pub max_page_no: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// 1ページしかなければページャを隠す
    pub pager_visible: bool,
    pub image_size: u32,
    pub image_size_no: usize,
    pub max_image_size_no: usize,
    pub magnified: Option<Magnified>,
}

/// モード種別を問わない操作
pub trait ModeControl {
    fn name(&self) -> ModeName;
    fn set_filters(&mut self, filters: Filters);
    fn next_page(&mut self);
    fn prev_page(&mut self);
    /// スライダーの値をそのまま設定する（範囲はコントロール側で保証）
    fn set_page(&mut self, page_no: usize);
    fn set_zoom(&mut self, image_size_no: usize);
    fn activate(&mut self, filters: Filters);
    fn magnify(&mut self, position: usize) -> Option<&Magnified>;
    fn unmagnify(&mut self);
    fn is_magnified(&self) -> bool;
    fn render(&self) -> ModeView;
}

/// モード共通の状態
#[derive(Debug, Clone)]
pub struct Mode<K: ModeKind> {
    kind: K,
    filters: Filters,
    page_no: usize,
    image_size_no: usize,
    cache: FilterCache,
    magnified: Option<Magnified>,
}

impl<K: ModeKind> Mode<K> {
    pub fn new(kind: K) -> Self {
        let mut mode = Self {
            kind,
            filters: Filters::default(),
            page_no: 1,
            image_size_no: 1,
            cache: FilterCache::default(),
            magnified: None,
        };
        mode.refresh_visible();
        mode
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut K {
        &mut self.kind
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn page_no(&self) -> usize {
        self.page_no
    }

    pub fn page_size(&self) -> usize {
        K::PAGE_SIZE
    }

    pub fn image_size_no(&self) -> usize {
        self.image_size_no
    }

    /// 現在のサムネイル高さ。範囲外のインデックスは最大サイズに丸める
    pub fn image_size(&self) -> u32 {
        let last = K::IMAGE_SIZES.len().saturating_sub(1);
        K::IMAGE_SIZES
            .get(self.image_size_no.min(last))
            .copied()
            .unwrap_or_default()
    }

    fn refresh_visible(&mut self) {
        let kind = &self.kind;
        let filters = self.filters;
        self.cache
            .get_or_compute(filters, || kind.filter_images(filters));
    }

    /// フィルタ後の画像インデックス
    pub fn visible_images(&self) -> Arc<[usize]> {
        self.cache.visible()
    }

    pub fn visible_count(&self) -> usize {
        self.cache.visible().len()
    }

    /// 最終ページ番号（表示対象が0件でも1）
    pub fn max_page_no(&self) -> usize {
        self.visible_count().div_ceil(K::PAGE_SIZE).max(1)
    }

    /// 現在ページの画像
    pub fn current_page_images(&self) -> Vec<&K::Item> {
        let visible = self.visible_images();
        let start = self.page_no.saturating_sub(1).saturating_mul(K::PAGE_SIZE);
        let end = start.saturating_add(K::PAGE_SIZE).min(visible.len());
        if start >= end {
            return Vec::new();
        }

        let images = self.kind.images();
        visible[start..end].iter().map(|&i| &images[i]).collect()
    }

    pub fn magnified(&self) -> Option<&Magnified> {
        self.magnified.as_ref()
    }
}

impl<K: ModeKind> ModeControl for Mode<K> {
    fn name(&self) -> ModeName {
        K::NAME
    }

    fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        // 範囲外の空ページに留まらないよう先頭へ戻す
        self.page_no = 1;
        self.refresh_visible();
    }

    fn next_page(&mut self) {
        self.page_no = self.page_no.saturating_add(1).min(self.max_page_no());
    }

    fn prev_page(&mut self) {
        self.page_no = self.page_no.saturating_sub(1).max(1);
    }

    fn set_page(&mut self, page_no: usize) {
        self.page_no = page_no;
    }

    fn set_zoom(&mut self, image_size_no: usize) {
        self.image_size_no = image_size_no;
    }

    fn activate(&mut self, filters: Filters) {
        self.set_filters(filters);
        self.page_no = 1;
        self.image_size_no = 1;
        log::debug!(
            "{}モードを有効化: 表示{}件 / {}ページ",
            K::NAME.as_str(),
            self.visible_count(),
            self.max_page_no()
        );
    }

    fn magnify(&mut self, position: usize) -> Option<&Magnified> {
        let magnified = self
            .current_page_images()
            .get(position)
            .map(|item| self.kind.magnify(item))?;
        self.magnified = Some(magnified);
        self.magnified.as_ref()
    }

    fn unmagnify(&mut self) {
        self.magnified = None;
    }

    fn is_magnified(&self) -> bool {
        self.magnified.is_some()
    }

    fn render(&self) -> ModeView {
        let image_size = self.image_size();
        let thumbnails = self
            .current_page_images()
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                self.kind
                    .thumbnail(item)
                    .with_max_height(image_size)
                    .on_click(Action::Magnify(position))
            })
            .collect();
        let max_page_no = self.max_page_no();

        ModeView {
            name: K::NAME,
            thumbnails,
            page_no: self.page_no,
            max_page_no,
            prev_enabled: self.page_no > 1,
            next_enabled: self.page_no < max_page_no,
            pager_visible: max_page_no > 1,
            image_size,
            image_size_no: self.image_size_no,
            max_image_size_no: K::IMAGE_SIZES.len().saturating_sub(1),
            magnified: self.magnified.clone(),
        }
    }
}

// =============================================
// スクリーンショットモード
// =============================================

/// スクリーンショット単位のモード
#[derive(Debug, Clone)]
pub struct ScreenshotsMode {
    images: Arc<[Screenshot]>,
}

impl ScreenshotsMode {
    pub fn new(images: Arc<[Screenshot]>) -> Self {
        Self { images }
    }
}

impl ModeKind for ScreenshotsMode {
    type Item = Screenshot;

    const NAME: ModeName = ModeName::Screenshots;
    const IMAGE_SIZES: &'static [u32] = &[100, 200, 300, 400, 600, 900, 1200];
    const PAGE_SIZE: usize = 50;

    fn images(&self) -> &[Screenshot] {
        &self.images
    }

    fn src(item: &Screenshot) -> &str {
        &item.name
    }

    fn filter_images(&self, filters: Filters) -> Vec<usize> {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, img)| filters.admits(img.false_positives > 0, img.false_negatives > 0))
            .map(|(i, _)| i)
            .collect()
    }

    fn thumbnail(&self, item: &Screenshot) -> ImageSpec {
        ImageSpec::new(&item.name).with_class("screenshot")
    }
}

// =============================================
// 検出モード
// =============================================

pub const SIMILAR_FRAGMENTS_HEADING: &str = "Similar fragments";

/// 切り出し画像単位のモード
#[derive(Debug, Clone)]
pub struct DetectionsMode {
    screenshots: Arc<[Screenshot]>,
    records: Vec<DetectionRecord>,
}

impl DetectionsMode {
    pub fn new(screenshots: Arc<[Screenshot]>) -> Self {
        let records = flatten_detections(&screenshots);
        Self { screenshots, records }
    }

    /// 元スクリーンショット
    pub fn origin(&self, record: &DetectionRecord) -> Option<&Screenshot> {
        self.screenshots.get(record.origin)
    }

    /// 類似フラグメントを設定し、設定できた件数を返す
    ///
    /// 対応がないレコードは None に戻す。
    pub fn set_similars(&mut self, similars: &SimilarsMap) -> usize {
        let mut attached = 0;
        for record in &mut self.records {
            record.similars = similars.get(&record.name).cloned();
            if record.similars.is_some() {
                attached += 1;
            }
        }
        log::info!("類似データ: {}/{}件に設定", attached, self.records.len());
        attached
    }

    pub fn record(&self, name: &str) -> Option<&DetectionRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

impl ModeKind for DetectionsMode {
    type Item = DetectionRecord;

    const NAME: ModeName = ModeName::Detections;
    const IMAGE_SIZES: &'static [u32] = &[50, 100, 200, 400, 600, 900];
    const PAGE_SIZE: usize = 250;

    fn images(&self) -> &[DetectionRecord] {
        &self.records
    }

    fn src(item: &DetectionRecord) -> &str {
        &item.name
    }

    fn filter_images(&self, filters: Filters) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                filters.admits(
                    r.kind == DetectionKind::FalseDetection,
                    r.kind == DetectionKind::MissedGroundTruth,
                )
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn thumbnail(&self, item: &DetectionRecord) -> ImageSpec {
        ImageSpec::new(&item.name)
            .with_class(item.kind.code())
            .with_title(item.kind.label())
    }

    fn magnify(&self, item: &DetectionRecord) -> Magnified {
        let mut view = Magnified::single(&item.name);

        if item.is_wide() {
            // 横長は2段にした方が見やすい
            view.push(Element::LineBreak);
        }
        if let Some(origin) = self.origin(item) {
            view.push(Element::image(&origin.name));
        }
        if let Some(similars) = &item.similars {
            view.push(Element::LineBreak);
            view.push(Element::heading(SIMILAR_FRAGMENTS_HEADING));
            for sim in similars {
                view.push(Element::image(&sim.file));
            }
        }
        view
    }
}
