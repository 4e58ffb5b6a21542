//! 検出レコード
//!
//! スクリーンショットごとの4種類のボックス一覧を、1ボックス=1レコードに平坦化する。

use crate::types::{BoxEntry, Screenshot, SimilarFragment};
use serde::{Deserialize, Serialize};

/// ボックスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionKind {
    TrueDetection,
    FalseDetection,
    DetectedGroundTruth,
    MissedGroundTruth,
}

impl DetectionKind {
    /// 平坦化の順序
    pub const ALL: [DetectionKind; 4] = [
        DetectionKind::TrueDetection,
        DetectionKind::FalseDetection,
        DetectionKind::DetectedGroundTruth,
        DetectionKind::MissedGroundTruth,
    ];

    /// 短縮コード（切り出しファイル名とCSSクラスで共用）
    pub fn code(&self) -> &'static str {
        match self {
            DetectionKind::TrueDetection => "td",
            DetectionKind::FalseDetection => "fd",
            DetectionKind::DetectedGroundTruth => "dgt",
            DetectionKind::MissedGroundTruth => "mgt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetectionKind::TrueDetection => "true detection",
            DetectionKind::FalseDetection => "false detection",
            DetectionKind::DetectedGroundTruth => "detected ground truth",
            DetectionKind::MissedGroundTruth => "missed ground truth",
        }
    }

    /// スクリーンショット内の該当ボックス一覧
    pub fn boxes_of(self, screenshot: &Screenshot) -> &[BoxEntry] {
        match self {
            DetectionKind::TrueDetection => &screenshot.detections.true_detections,
            DetectionKind::FalseDetection => &screenshot.detections.false_detections,
            DetectionKind::DetectedGroundTruth => &screenshot.ground_truth.detected,
            DetectionKind::MissedGroundTruth => &screenshot.ground_truth.missed,
        }
    }
}

/// 切り出し画像1枚分のレコード
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    /// 切り出し画像のファイルパス
    pub name: String,
    pub kind: DetectionKind,
    /// 元スクリーンショットのインデックス（所有しない参照）
    pub origin: usize,
    pub bbox: Vec<f64>,
    /// nn.json 読み込み後に設定される。該当なしは None（空Vecではない）
    pub similars: Option<Vec<SimilarFragment>>,
}

impl DetectionRecord {
    /// 横長か（拡大表示で改行を挟むかの判定）
    pub fn is_wide(&self) -> bool {
        match self.bbox.as_slice() {
            [x0, y0, x1, y1, ..] => x1 - x0 > y1 - y0,
            _ => false,
        }
    }
}

/// 全スクリーンショットのボックスをレコードに平坦化
///
/// 件数は全スクリーンショットの4一覧の長さの総和になる。
pub fn flatten_detections(screenshots: &[Screenshot]) -> Vec<DetectionRecord> {
    let mut all = Vec::new();

    for (origin, screenshot) in screenshots.iter().enumerate() {
        for kind in DetectionKind::ALL {
            for entry in kind.boxes_of(screenshot) {
                all.push(DetectionRecord {
                    name: entry.file.clone(),
                    kind,
                    origin,
                    bbox: entry.bbox.clone(),
                    similars: None,
                });
            }
        }
    }

    log::debug!("{}件の検出レコードを生成", all.len());
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionBoxes, GroundTruthBoxes};

    fn entry(file: &str, bbox: [f64; 4]) -> BoxEntry {
        BoxEntry { file: file.to_string(), bbox: bbox.to_vec() }
    }

    fn screenshot(name: &str, td: usize, fd: usize, dgt: usize, mgt: usize) -> Screenshot {
        let boxes = |prefix: &str, n: usize| -> Vec<BoxEntry> {
            (0..n)
                .map(|i| entry(&format!("{}_{}_{}.png", name, prefix, i), [0.0, 0.0, 10.0, 10.0]))
                .collect()
        };
        Screenshot {
            name: name.to_string(),
            false_positives: fd as u32,
            false_negatives: mgt as u32,
            detections: DetectionBoxes {
                true_detections: boxes("td", td),
                false_detections: boxes("fd", fd),
            },
            ground_truth: GroundTruthBoxes {
                detected: boxes("dgt", dgt),
                missed: boxes("mgt", mgt),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_count() {
        let shots = vec![screenshot("a", 2, 1, 3, 1)];
        let records = flatten_detections(&shots);
        assert_eq!(records.len(), 7);
    }

    #[test]
    fn test_flatten_order_and_origin() {
        let shots = vec![screenshot("a", 1, 1, 0, 0), screenshot("b", 0, 0, 1, 1)];
        let records = flatten_detections(&shots);

        let kinds: Vec<_> = records.iter().map(|r| (r.origin, r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, DetectionKind::TrueDetection),
                (0, DetectionKind::FalseDetection),
                (1, DetectionKind::DetectedGroundTruth),
                (1, DetectionKind::MissedGroundTruth),
            ]
        );
        assert_eq!(records[2].name, "b_dgt_0.png");
        assert!(records.iter().all(|r| r.similars.is_none()));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_detections(&[]).is_empty());
    }

    #[test]
    fn test_is_wide() {
        let mut record = DetectionRecord {
            name: "x.png".to_string(),
            kind: DetectionKind::FalseDetection,
            origin: 0,
            bbox: vec![10.0, 40.0, 60.0, 70.0, 0.45],
            similars: None,
        };
        assert!(record.is_wide());

        record.bbox = vec![0.0, 0.0, 10.0, 10.0];
        assert!(!record.is_wide()); // 正方形は横長ではない

        record.bbox = vec![0.0, 0.0, 10.0];
        assert!(!record.is_wide());
    }

    #[test]
    fn test_kind_codes() {
        let codes: Vec<_> = DetectionKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec!["td", "fd", "dgt", "mgt"]);
    }
}
