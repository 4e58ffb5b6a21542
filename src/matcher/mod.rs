//! 検出ボックスと正解ボックスの照合

pub mod types;

pub use types::{ImageDetections, MatchSet, ScoredBox};

use crate::error::{GalleryError, Result};
use std::path::Path;

const EPSILON: f64 = 1e-7;

/// 2つの矩形のIoU（intersection over union）
pub fn iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let [a_x0, a_y0, a_x1, a_y1] = *a;
    let [b_x0, b_y0, b_x1, b_y1] = *b;

    let int_x0 = a_x0.max(b_x0);
    let int_y0 = a_y0.max(b_y0);
    let int_x1 = a_x1.min(b_x1);
    let int_y1 = a_y1.min(b_y1);

    if int_x0 > int_x1 || int_y0 > int_y1 {
        return 0.0;
    }

    let int_area = (int_x1 - int_x0) * (int_y1 - int_y0);
    let a_area = (a_x1 - a_x0) * (a_y1 - a_y0);
    let b_area = (b_x1 - b_x0) * (b_y1 - b_y0);

    int_area / (a_area + b_area - int_area + EPSILON)
}

impl MatchSet {
    /// 検出と正解を照合する
    ///
    /// 信頼度が `confidence_threshold` 未満の検出は捨てる。
    /// 正解ごとに、IoUが `match_iou` 以上となる最初の検出を対応付ける。
    /// 複数の正解に対応した検出も1つの正検出として数える。
    pub fn new(
        image_name: impl Into<String>,
        detected: &[[f64; 5]],
        expected: &[[f64; 4]],
        confidence_threshold: f64,
        match_iou: f64,
    ) -> Self {
        let detections: Vec<ScoredBox> = detected
            .iter()
            .map(ScoredBox::from_detection)
            .filter(|d| d.score >= confidence_threshold)
            .collect();
        let mut matched = vec![false; detections.len()];

        let mut detected_ground_truth = Vec::new();
        let mut missed_ground_truth = Vec::new();

        for expected_box in expected {
            let hit = detections
                .iter()
                .position(|d| iou(expected_box, &d.rect) >= match_iou);

            match hit {
                Some(i) => {
                    matched[i] = true;
                    detected_ground_truth.push(ScoredBox::new(*expected_box, detections[i].score));
                }
                None => missed_ground_truth.push(ScoredBox::new(*expected_box, 0.0)),
            }
        }

        let (true_detections, false_detections) = detections
            .into_iter()
            .zip(matched)
            .fold((Vec::new(), Vec::new()), |(mut td, mut fd), (d, hit)| {
                if hit {
                    td.push(d);
                } else {
                    fd.push(d);
                }
                (td, fd)
            });

        let match_set = Self {
            image_name: image_name.into(),
            true_detections,
            false_detections,
            detected_ground_truth,
            missed_ground_truth,
        };
        log::debug!(
            "{}: TP:{} FN:{} FP:{}",
            match_set.image_name,
            match_set.tp(),
            match_set.fn_count(),
            match_set.fp()
        );
        match_set
    }
}

/// 全画像の照合結果と集計
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub match_sets: Vec<MatchSet>,
    pub tp: usize,
    pub fn_count: usize,
    pub fp: usize,
}

impl Evaluation {
    pub fn new(match_sets: Vec<MatchSet>) -> Self {
        let tp = match_sets.iter().map(MatchSet::tp).sum();
        let fn_count = match_sets.iter().map(MatchSet::fn_count).sum();
        let fp = match_sets.iter().map(MatchSet::fp).sum();
        Self { match_sets, tp, fn_count, fp }
    }

    /// 正解のうち検出できた割合
    pub fn recall(&self) -> f64 {
        self.tp as f64 / (self.tp as f64 + self.fn_count as f64 + EPSILON)
    }

    /// 検出のうち正解だった割合
    pub fn precision(&self) -> f64 {
        self.tp as f64 / (self.tp as f64 + self.fp as f64 + EPSILON)
    }
}

/// 入力JSONを読み込む
pub fn load_detections(path: &Path) -> Result<Vec<ImageDetections>> {
    if !path.exists() {
        return Err(GalleryError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let images: Vec<ImageDetections> = serde_json::from_str(&content)?;

    if let Some(bad) = images.iter().find(|i| i.image.is_empty()) {
        return Err(GalleryError::InvalidInput(format!(
            "画像名が空のエントリがあります（検出{}件）",
            bad.detected.len()
        )));
    }

    Ok(images)
}

/// 全画像を照合する
pub fn match_detections(
    images: &[ImageDetections],
    confidence_threshold: f64,
    match_iou: f64,
) -> Evaluation {
    let match_sets = images
        .iter()
        .map(|img| {
            MatchSet::new(
                img.image.clone(),
                &img.detected,
                &img.expected,
                confidence_threshold,
                match_iou,
            )
        })
        .collect();
    Evaluation::new(match_sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match_set() -> MatchSet {
        MatchSet::new(
            "foo.png",
            &[[10.1, 10.1, 20.1, 30.1, 0.55], [10.0, 40.0, 60.0, 70.0, 0.45]],
            &[[9.0, 11.0, 22.0, 29.0], [20.0, 30.0, 70.0, 40.0], [80.0, 15.0, 95.0, 50.0]],
            0.4,
            0.4,
        )
    }

    #[test]
    fn test_iou_identical() {
        let b = [0.0, 0.0, 10.0, 10.0];
        assert!((iou(&b, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_disjoint() {
        assert_eq!(iou(&[0.0, 0.0, 10.0, 10.0], &[20.0, 20.0, 30.0, 30.0]), 0.0);
    }

    #[test]
    fn test_iou_half_overlap() {
        // 交差50、和集合150
        let v = iou(&[0.0, 0.0, 10.0, 10.0], &[5.0, 0.0, 15.0, 10.0]);
        assert!((v - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_match_set_counts() {
        let ms = sample_match_set();
        assert_eq!(ms.tp(), 1);
        assert_eq!(ms.fn_count(), 2);
        assert_eq!(ms.fp(), 1);
    }

    #[test]
    fn test_match_set_boxes() {
        let ms = sample_match_set();
        assert_eq!(ms.true_detections, vec![ScoredBox::new([10.1, 10.1, 20.1, 30.1], 0.55)]);
        assert_eq!(ms.false_detections, vec![ScoredBox::new([10.0, 40.0, 60.0, 70.0], 0.45)]);
        assert_eq!(ms.detected_ground_truth, vec![ScoredBox::new([9.0, 11.0, 22.0, 29.0], 0.55)]);
        assert_eq!(
            ms.missed_ground_truth,
            vec![
                ScoredBox::new([20.0, 30.0, 70.0, 40.0], 0.0),
                ScoredBox::new([80.0, 15.0, 95.0, 50.0], 0.0),
            ]
        );
    }

    #[test]
    fn test_confidence_threshold_drops_detections() {
        let ms = MatchSet::new(
            "foo.png",
            &[[10.0, 40.0, 60.0, 70.0, 0.45]],
            &[[10.0, 40.0, 60.0, 70.0]],
            0.5,
            0.4,
        );
        assert!(ms.true_detections.is_empty());
        assert!(ms.false_detections.is_empty());
        assert_eq!(ms.fn_count(), 1);
    }

    #[test]
    fn test_one_detection_many_expected() {
        let ms = MatchSet::new(
            "foo.png",
            &[[0.0, 0.0, 10.0, 10.0, 0.9]],
            &[[0.0, 0.0, 10.0, 10.0], [0.0, 0.0, 10.0, 9.0]],
            0.5,
            0.4,
        );
        assert_eq!(ms.tp(), 2);
        assert_eq!(ms.true_detections.len(), 1);
        assert_eq!(ms.fp(), 0);
    }

    #[test]
    fn test_evaluation_totals() {
        let eval = Evaluation::new(vec![sample_match_set(), sample_match_set()]);
        assert_eq!(eval.tp, 2);
        assert_eq!(eval.fn_count, 4);
        assert_eq!(eval.fp, 2);
        assert!((eval.recall() - 2.0 / 6.0).abs() < 1e-6);
        assert!((eval.precision() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_evaluation_empty() {
        let eval = Evaluation::new(Vec::new());
        assert_eq!(eval.recall(), 0.0);
        assert_eq!(eval.precision(), 0.0);
    }

    #[test]
    fn test_scored_box_to_vec() {
        let b = ScoredBox::new([1.5, 2.0, 3.9, 4.0], 0.25);
        assert_eq!(b.to_vec(), vec![1.5, 2.0, 3.9, 4.0, 0.25]);
        assert_eq!(b.pixel_rect(), [1, 2, 3, 4]);
    }
}
