//! 表示フィルタとフィルタ結果のキャッシュ

use std::sync::Arc;

/// フィルタ設定（3つのチェックボックス）
///
/// 排他ではなくOR条件。`show_all` が立っていれば他は見ない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filters {
    pub show_all: bool,
    pub show_fp: bool,
    pub show_fn: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            show_all: true,
            show_fp: false,
            show_fn: false,
        }
    }
}

impl Filters {
    pub fn new(show_all: bool, show_fp: bool, show_fn: bool) -> Self {
        Self { show_all, show_fp, show_fn }
    }

    /// 画像を表示するか
    ///
    /// どのフラグも立っていなければ何も表示しない（全表示へのフォールバックはしない）。
    pub fn admits(&self, is_false_positive: bool, is_false_negative: bool) -> bool {
        if self.show_all {
            return true;
        }
        (self.show_fp && is_false_positive) || (self.show_fn && is_false_negative)
    }
}

/// フィルタ結果のキャッシュ（容量1、期限なし）
///
/// 元の画像一覧は読み込み後に変化しないので、キーはフィルタ設定のみ。
#[derive(Debug, Clone)]
pub struct FilterCache {
    key: Option<Filters>,
    visible: Arc<[usize]>,
}

impl Default for FilterCache {
    fn default() -> Self {
        Self {
            key: None,
            visible: Arc::from(Vec::new()),
        }
    }
}

impl FilterCache {
    /// キーが前回と異なるときだけ再計算する
    pub fn get_or_compute<F>(&mut self, key: Filters, compute: F) -> Arc<[usize]>
    where
        F: FnOnce() -> Vec<usize>,
    {
        if self.key != Some(key) {
            self.visible = compute().into();
            self.key = Some(key);
        }
        Arc::clone(&self.visible)
    }

    /// 直近の計算結果
    pub fn visible(&self) -> Arc<[usize]> {
        Arc::clone(&self.visible)
    }
}
