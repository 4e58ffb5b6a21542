use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 正解と検出を対応付けるIoUの下限
    pub match_iou: f64,
    /// これ未満の信頼度の検出は捨てる
    pub confidence_threshold: f64,
    /// ビルド済みギャラリーのディレクトリ（Trunk の dist/ など）
    pub ui_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_iou: 0.4,
            confidence_threshold: 0.5,
            ui_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("detection-gallery").join("config.json"))
    }

    pub fn set_match_iou(&mut self, value: f64) -> Result<()> {
        self.match_iou = check_ratio("match_iou", value)?;
        Ok(())
    }

    pub fn set_confidence_threshold(&mut self, value: f64) -> Result<()> {
        self.confidence_threshold = check_ratio("confidence_threshold", value)?;
        Ok(())
    }

    pub fn set_ui_dir(&mut self, dir: PathBuf) {
        self.ui_dir = Some(dir);
    }

    /// コマンドライン指定で上書きした値
    pub fn with_overrides(&self, match_iou: Option<f64>, confidence: Option<f64>) -> Result<Self> {
        let mut config = self.clone();
        if let Some(v) = match_iou {
            config.set_match_iou(v)?;
        }
        if let Some(v) = confidence {
            config.set_confidence_threshold(v)?;
        }
        Ok(config)
    }
}

fn check_ratio(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GalleryError::Config(format!(
            "{} は0.0〜1.0で指定してください: {}",
            name, value
        )))
    }
}
