use serde::{Deserialize, Serialize};

/// 入力: 1画像分の検出結果と正解
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageDetections {
    /// 画像ファイル名（画像フォルダからの相対パス）
    pub image: String,

    /// 検出ボックス `[x0, y0, x1, y1, confidence]`
    #[serde(default)]
    pub detected: Vec<[f64; 5]>,

    /// 正解ボックス `[x0, y0, x1, y1]`
    #[serde(default)]
    pub expected: Vec<[f64; 4]>,
}

/// スコア付きの矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredBox {
    pub rect: [f64; 4],
    pub score: f64,
}

impl ScoredBox {
    pub fn new(rect: [f64; 4], score: f64) -> Self {
        Self { rect, score }
    }

    pub fn from_detection(detection: &[f64; 5]) -> Self {
        let [x0, y0, x1, y1, score] = *detection;
        Self::new([x0, y0, x1, y1], score)
    }

    /// data.json 用の `[x0, y0, x1, y1, score]`
    pub fn to_vec(&self) -> Vec<f64> {
        let mut v = self.rect.to_vec();
        v.push(self.score);
        v
    }

    /// 整数に切り捨てた座標
    pub fn pixel_rect(&self) -> [i64; 4] {
        self.rect.map(|v| v as i64)
    }
}

/// 1画像分の照合結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    pub image_name: String,
    pub true_detections: Vec<ScoredBox>,
    pub false_detections: Vec<ScoredBox>,
    /// スコアは対応した検出の信頼度
    pub detected_ground_truth: Vec<ScoredBox>,
    /// スコアは0
    pub missed_ground_truth: Vec<ScoredBox>,
}

impl MatchSet {
    /// 真陽性（検出された正解）
    pub fn tp(&self) -> usize {
        self.detected_ground_truth.len()
    }

    /// 偽陰性（見逃した正解）
    pub fn fn_count(&self) -> usize {
        self.missed_ground_truth.len()
    }

    /// 偽陽性（正解に対応しない検出）
    pub fn fp(&self) -> usize {
        self.false_detections.len()
    }
}
