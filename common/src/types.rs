//! data.json / nn.json の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Screenshot: スクリーンショット1枚分の評価結果（data.json の要素）
//! - BoxEntry: 切り出し画像ファイルと矩形
//! - SimilarFragment: 類似フラグメント（nn.json の要素）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 矩形1つ分のエントリ
///
/// `bbox` は `[x0, y0, x1, y1]`、検出結果ではその後ろに信頼度が付く。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxEntry {
    pub file: String,
    #[serde(rename = "box")]
    pub bbox: Vec<f64>,
}

impl BoxEntry {
    pub fn width(&self) -> f64 {
        match (self.bbox.first(), self.bbox.get(2)) {
            (Some(x0), Some(x1)) => x1 - x0,
            _ => 0.0,
        }
    }

    pub fn height(&self) -> f64 {
        match (self.bbox.get(1), self.bbox.get(3)) {
            (Some(y0), Some(y1)) => y1 - y0,
            _ => 0.0,
        }
    }
}

/// 検出ボックス（正検出 / 誤検出）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionBoxes {
    #[serde(rename = "true")]
    pub true_detections: Vec<BoxEntry>,
    #[serde(rename = "false")]
    pub false_detections: Vec<BoxEntry>,
}

/// 正解ボックス（検出済み / 見逃し）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTruthBoxes {
    pub detected: Vec<BoxEntry>,
    pub missed: Vec<BoxEntry>,
}

/// スクリーンショット1枚分の評価結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub name: String,

    #[serde(rename = "tp", default)]
    pub true_positives: u32,

    #[serde(rename = "fn")]
    pub false_negatives: u32,

    #[serde(rename = "fp")]
    pub false_positives: u32,

    #[serde(default)]
    pub detections: DetectionBoxes,

    #[serde(default)]
    pub ground_truth: GroundTruthBoxes,
}

/// 類似フラグメント
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarFragment {
    pub file: String,
}

/// 切り出し画像ファイル名 → 類似フラグメント一覧
pub type SimilarsMap = HashMap<String, Vec<SimilarFragment>>;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{
        "name": "foo.png",
        "tp": 1,
        "fn": 2,
        "fp": 1,
        "detections": {
            "true": [{"file": "foo_td_10,10-20,30.png", "box": [10.1, 10.1, 20.1, 30.1, 0.55]}],
            "false": [{"file": "foo_fd_10,40-60,70.png", "box": [10, 40, 60, 70, 0.45]}]
        },
        "ground_truth": {
            "detected": [{"file": "foo_dgt_9,11-22,29.png", "box": [9, 11, 22, 29, 0.55]}],
            "missed": [
                {"file": "foo_mgt_20,30-70,40.png", "box": [20, 30, 70, 40, 0]},
                {"file": "foo_mgt_80,15-95,50.png", "box": [80, 15, 95, 50, 0]}
            ]
        }
    }]"#;

    #[test]
    fn test_screenshot_deserialize() {
        let data: Vec<Screenshot> = serde_json::from_str(SAMPLE).expect("デシリアライズ失敗");
        assert_eq!(data.len(), 1);

        let shot = &data[0];
        assert_eq!(shot.name, "foo.png");
        assert_eq!(shot.true_positives, 1);
        assert_eq!(shot.false_negatives, 2);
        assert_eq!(shot.false_positives, 1);
        assert_eq!(shot.detections.true_detections.len(), 1);
        assert_eq!(shot.ground_truth.missed.len(), 2);
        assert_eq!(shot.ground_truth.missed[1].file, "foo_mgt_80,15-95,50.png");
    }

    #[test]
    fn test_screenshot_deserialize_missing_boxes() {
        // fp/fn だけのレコードも読めること
        let json = r#"{"name": "bar.png", "fp": 0, "fn": 3}"#;
        let shot: Screenshot = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(shot.false_negatives, 3);
        assert_eq!(shot.true_positives, 0); // デフォルト値
        assert!(shot.detections.false_detections.is_empty());
        assert!(shot.ground_truth.detected.is_empty());
    }

    #[test]
    fn test_screenshot_serialize_keys() {
        let shot = Screenshot {
            name: "a.png".to_string(),
            false_positives: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&shot).expect("シリアライズ失敗");
        assert!(json.contains("\"fp\":2"));
        assert!(json.contains("\"fn\":0"));
        assert!(json.contains("\"ground_truth\""));
        assert!(json.contains("\"true\":[]"));
    }

    #[test]
    fn test_box_entry_size() {
        let entry = BoxEntry {
            file: "x.png".to_string(),
            bbox: vec![10.0, 40.0, 60.0, 70.0, 0.45],
        };
        assert_eq!(entry.width(), 50.0);
        assert_eq!(entry.height(), 30.0);

        let short = BoxEntry { file: "y.png".to_string(), bbox: vec![1.0, 2.0] };
        assert_eq!(short.width(), 0.0);
        assert_eq!(short.height(), 0.0);
    }

    #[test]
    fn test_similars_map_deserialize() {
        let json = r#"{"crop1.png": [{"file": "sim1.png"}, {"file": "sim2.png"}]}"#;
        let map: SimilarsMap = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(map["crop1.png"].len(), 2);
        assert_eq!(map["crop1.png"][0].file, "sim1.png");
    }

    #[test]
    fn test_similars_map_wrong_format() {
        let json = r#"{"crop1.png": "sim1.png"}"#;
        assert!(serde_json::from_str::<SimilarsMap>(json).is_err());
    }
}
