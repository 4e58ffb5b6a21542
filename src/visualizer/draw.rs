//! 枠線・信頼度ラベルの描画と切り出し

use ab_glyph::{FontRef, PxScale};
use detection_gallery_common::DetectionKind;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const LABEL_SCALE: f32 = 12.0;

/// 描画順。後に描いた枠が上書きする。
pub const DRAW_ORDER: [DetectionKind; 4] = [
    DetectionKind::DetectedGroundTruth,
    DetectionKind::MissedGroundTruth,
    DetectionKind::TrueDetection,
    DetectionKind::FalseDetection,
];

/// 種類ごとの枠線色
pub fn kind_color(kind: DetectionKind) -> Rgb<u8> {
    match kind {
        DetectionKind::TrueDetection => Rgb([0, 200, 0]),
        DetectionKind::FalseDetection => Rgb([200, 100, 0]),
        DetectionKind::DetectedGroundTruth => Rgb([0, 0, 255]),
        DetectionKind::MissedGroundTruth => Rgb([255, 0, 0]),
    }
}

/// 信頼度ラベルを付ける種類か（検出のみ）
pub fn has_label(kind: DetectionKind) -> bool {
    matches!(kind, DetectionKind::TrueDetection | DetectionKind::FalseDetection)
}

/// 信頼度を百分率の文字列にする（`0.55` → `55%`）
pub fn confidence_label(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// 枠の左上 `(x0+2, y0+1)` にラベルを描く
pub fn draw_label(img: &mut RgbImage, rect: [i64; 4], text: &str, color: Rgb<u8>) {
    let font = match FontRef::try_from_slice(FONT_DATA) {
        Ok(font) => font,
        Err(e) => {
            log::warn!("ラベル用フォントを読み込めません: {}", e);
            return;
        }
    };
    let [x0, y0, _, _] = rect;
    draw_text_mut(
        img,
        color,
        (x0 + 2) as i32,
        (y0 + 1) as i32,
        PxScale::from(LABEL_SCALE),
        &font,
        text,
    );
}

/// 1pxの枠線を描く
///
/// 枠は `x0..x1-1`, `y0..y1-1` を囲む。画像外の画素は無視する。
pub fn draw_outline(img: &mut RgbImage, rect: [i64; 4], color: Rgb<u8>) {
    let [x0, y0, x1, y1] = rect;
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    let (w, h) = (img.width() as i64, img.height() as i64);
    let mut put = |x: i64, y: i64| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            img.put_pixel(x as u32, y as u32, color);
        }
    };

    for x in x0..x1 {
        put(x, y0);
        put(x, y1 - 1);
    }
    for y in y0..y1 {
        put(x0, y);
        put(x1 - 1, y);
    }
}

/// 矩形を切り出す
///
/// 画像外にはみ出した分は切り詰め、最低1pxは残す。
pub fn crop(img: &RgbImage, rect: [i64; 4]) -> RgbImage {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let [x0, y0, x1, y1] = rect;

    let x = x0.clamp(0, (w - 1).max(0));
    let y = y0.clamp(0, (h - 1).max(0));
    let width = (x1.min(w) - x).max(1);
    let height = (y1.min(h) - y).max(1);

    image::imageops::crop_imm(img, x as u32, y as u32, width as u32, height as u32).to_image()
}
