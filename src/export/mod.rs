//! ギャラリー用ファイルの出力

pub mod assets;

pub use assets::write_ui_assets;

use crate::error::Result;
use detection_gallery_common::Screenshot;
use std::path::{Path, PathBuf};

/// ギャラリーが読み込むデータファイル名
pub const DATA_JSON: &str = "data.json";

/// data.json を書き出す
pub fn write_data_json(screenshots: &[Screenshot], out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(DATA_JSON);
    let json = serde_json::to_string_pretty(screenshots)?;
    std::fs::write(&path, json)?;
    log::debug!("{} を書き出し: {}件", path.display(), screenshots.len());
    Ok(path)
}
