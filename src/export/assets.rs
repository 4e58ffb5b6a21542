//! ビルド済みギャラリー（HTML/JS/WASM）のコピー

use crate::error::{GalleryError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// `ui_dir` 以下の通常ファイルを相対パスを保って `out_dir` にコピーする
///
/// コピーしたファイル数を返す。
pub fn write_ui_assets(ui_dir: &Path, out_dir: &Path) -> Result<usize> {
    if !ui_dir.is_dir() {
        return Err(GalleryError::FolderNotFound(ui_dir.display().to_string()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(ui_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(ui_dir) {
            Ok(p) => p,
            Err(_) => continue,
        };
        let target = out_dir.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(entry.path(), &target)?;
        log::debug!("コピー: {}", relative.display());
        copied += 1;
    }

    Ok(copied)
}
