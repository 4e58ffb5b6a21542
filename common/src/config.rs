//! ギャラリー設定

use serde::{Deserialize, Serialize};

/// ブラウザ側ギャラリーの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// 評価結果（必須）
    pub data_path: String,
    /// 類似フラグメント（任意）
    pub nn_path: String,
    /// 警告メッセージの自動消去秒数
    pub warning_seconds: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            data_path: "data.json".into(),
            nn_path: "nn.json".into(),
            warning_seconds: 10,
        }
    }
}
