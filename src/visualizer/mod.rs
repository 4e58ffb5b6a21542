//! 照合結果の可視化（枠線付きスクリーンショットと切り出し画像）

pub mod draw;

use crate::error::{GalleryError, Result};
use crate::matcher::{Evaluation, MatchSet, ScoredBox};
use detection_gallery_common::{
    BoxEntry, DetectionBoxes, DetectionKind, GroundTruthBoxes, Screenshot,
};
use image::{DynamicImage, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;

/// 種類ごとのボックス一覧
fn boxes_of(match_set: &MatchSet, kind: DetectionKind) -> &[ScoredBox] {
    match kind {
        DetectionKind::TrueDetection => &match_set.true_detections,
        DetectionKind::FalseDetection => &match_set.false_detections,
        DetectionKind::DetectedGroundTruth => &match_set.detected_ground_truth,
        DetectionKind::MissedGroundTruth => &match_set.missed_ground_truth,
    }
}

/// 切り出し画像のファイル名
///
/// `<画像名の拡張子抜き>_<種類>_<x0>,<y0>-<x1>,<y1>.png`
///
/// 画像名のフォルダ部分は残すので、別フォルダの同名画像は衝突しない。
pub fn crop_file_name(image_name: &str, kind: DetectionKind, scored: &ScoredBox) -> String {
    let base = Path::new(image_name).with_extension("");
    let [x0, y0, x1, y1] = scored.pixel_rect();
    format!(
        "{}_{}_{},{}-{},{}.png",
        base.to_string_lossy(),
        kind.code(),
        x0,
        y0,
        x1,
        y1
    )
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)
        .map_err(|e| GalleryError::ImageSave(format!("{}: {}", path.display(), e)))
}

/// 1画像分の可視化
///
/// 各ボックスの切り出しPNGと、枠線を描いたスクリーンショットを `out_dir` に書き出し、
/// data.json の1要素を返す。
pub fn visualize_match_set(
    match_set: &MatchSet,
    image: &DynamicImage,
    out_dir: &Path,
) -> Result<Screenshot> {
    let original = image.to_rgb8();
    let mut annotated = original.clone();

    for kind in draw::DRAW_ORDER {
        let color = draw::kind_color(kind);
        for scored in boxes_of(match_set, kind) {
            draw::draw_outline(&mut annotated, scored.pixel_rect(), color);
            if draw::has_label(kind) {
                let label = draw::confidence_label(scored.score);
                draw::draw_label(&mut annotated, scored.pixel_rect(), &label, color);
            }
        }
    }

    let entries_of = |kind: DetectionKind| -> Result<Vec<BoxEntry>> {
        boxes_of(match_set, kind)
            .iter()
            .map(|scored| {
                let file = crop_file_name(&match_set.image_name, kind, scored);
                save(&draw::crop(&original, scored.pixel_rect()), &out_dir.join(&file))?;
                Ok(BoxEntry { file, bbox: scored.to_vec() })
            })
            .collect()
    };

    let detections = DetectionBoxes {
        true_detections: entries_of(DetectionKind::TrueDetection)?,
        false_detections: entries_of(DetectionKind::FalseDetection)?,
    };
    let ground_truth = GroundTruthBoxes {
        detected: entries_of(DetectionKind::DetectedGroundTruth)?,
        missed: entries_of(DetectionKind::MissedGroundTruth)?,
    };

    save(&annotated, &out_dir.join(&match_set.image_name))?;

    Ok(Screenshot {
        name: match_set.image_name.clone(),
        true_positives: match_set.tp() as u32,
        false_negatives: match_set.fn_count() as u32,
        false_positives: match_set.fp() as u32,
        detections,
        ground_truth,
    })
}

/// 画像フォルダから1枚読み込んで可視化する
///
/// 画像が無い場合は警告を出して `None` を返す。
fn visualize_one(match_set: &MatchSet, images_dir: &Path, out_dir: &Path) -> Result<Option<Screenshot>> {
    let path = images_dir.join(&match_set.image_name);
    if !path.is_file() {
        log::warn!("画像が見つからないためスキップ: {}", path.display());
        return Ok(None);
    }

    let image = image::open(&path)
        .map_err(|e| GalleryError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    visualize_match_set(match_set, &image, out_dir).map(Some)
}

/// 全画像を並列に可視化する
///
/// 戻り値の順序は入力の順序を保つ。見つからなかった画像は含まない。
pub fn visualize_all(
    evaluation: &Evaluation,
    images_dir: &Path,
    out_dir: &Path,
    show_progress: bool,
) -> Result<Vec<Screenshot>> {
    if !images_dir.is_dir() {
        return Err(GalleryError::FolderNotFound(images_dir.display().to_string()));
    }
    std::fs::create_dir_all(out_dir)?;

    let total = evaluation.match_sets.len() as u64;
    let progress = if show_progress {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<Option<Screenshot>> = evaluation
        .match_sets
        .par_iter()
        .map(|ms| {
            let result = visualize_one(ms, images_dir, out_dir);
            progress.inc(1);
            result
        })
        .collect::<Result<_>>()?;

    progress.finish_and_clear();

    let screenshots: Vec<Screenshot> = results.into_iter().flatten().collect();
    log::info!("可視化完了: {}/{}枚", screenshots.len(), total);
    Ok(screenshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

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
    fn test_crop_file_name() {
        let b = ScoredBox::new([10.1, 10.1, 20.1, 30.1], 0.55);
        assert_eq!(
            crop_file_name("foo.png", DetectionKind::TrueDetection, &b),
            "foo_td_10,10-20,30.png"
        );
        let b = ScoredBox::new([80.0, 15.0, 95.0, 50.0], 0.0);
        assert_eq!(
            crop_file_name("shots/bar.jpg", DetectionKind::MissedGroundTruth, &b),
            "shots/bar_mgt_80,15-95,50.png"
        );
        assert_eq!(
            crop_file_name("a.b/baz", DetectionKind::MissedGroundTruth, &b),
            "a.b/baz_mgt_80,15-95,50.png"
        );
    }

    #[test]
    fn test_visualize_match_set_writes_files() {
        let dir = tempdir().unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, image::Rgb([255, 255, 255])));
        let ms = sample_match_set();

        let shot = visualize_match_set(&ms, &image, dir.path()).unwrap();

        assert_eq!(shot.name, "foo.png");
        assert_eq!((shot.true_positives, shot.false_negatives, shot.false_positives), (1, 2, 1));
        assert_eq!(shot.detections.true_detections[0].file, "foo_td_10,10-20,30.png");
        assert_eq!(shot.detections.true_detections[0].bbox, vec![10.1, 10.1, 20.1, 30.1, 0.55]);
        assert_eq!(shot.ground_truth.detected[0].bbox[4], 0.55);
        assert_eq!(shot.ground_truth.missed.len(), 2);
        assert!(shot.ground_truth.missed.iter().all(|b| b.bbox[4] == 0.0));

        assert!(dir.path().join("foo.png").is_file());
        assert!(dir.path().join("foo_fd_10,40-60,70.png").is_file());
        assert!(dir.path().join("foo_dgt_9,11-22,29.png").is_file());
        assert!(dir.path().join("foo_mgt_20,30-70,40.png").is_file());
        assert!(dir.path().join("foo_mgt_80,15-95,50.png").is_file());

        let annotated = image::open(dir.path().join("foo.png")).unwrap().to_rgb8();
        assert_eq!(*annotated.get_pixel(80, 15), draw::kind_color(DetectionKind::MissedGroundTruth));

        // 切り出しは枠線を含まない元画像から
        let crop = image::open(dir.path().join("foo_mgt_80,15-95,50.png")).unwrap().to_rgb8();
        assert_eq!(crop.dimensions(), (15, 35));
        assert_eq!(*crop.get_pixel(0, 0), image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_visualize_all_skips_missing() {
        let images = tempdir().unwrap();
        let out = tempdir().unwrap();
        RgbImage::new(100, 100).save(images.path().join("foo.png")).unwrap();

        let mut missing = sample_match_set();
        missing.image_name = "missing.png".into();
        let eval = Evaluation::new(vec![missing, sample_match_set()]);

        let shots = visualize_all(&eval, images.path(), out.path(), false).unwrap();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].name, "foo.png");
    }

    #[test]
    fn test_same_file_name_in_different_folders() {
        let images = tempdir().unwrap();
        let out = tempdir().unwrap();
        let magenta = image::Rgb([255, 0, 255]);
        let cyan = image::Rgb([0, 255, 255]);
        for (folder, color) in [("a", magenta), ("b", cyan)] {
            std::fs::create_dir_all(images.path().join(folder)).unwrap();
            RgbImage::from_pixel(40, 40, color)
                .save(images.path().join(folder).join("x.png"))
                .unwrap();
        }

        let detected = [[0.0, 0.0, 10.0, 10.0, 0.9]];
        let eval = Evaluation::new(vec![
            MatchSet::new("a/x.png", &detected, &[], 0.5, 0.4),
            MatchSet::new("b/x.png", &detected, &[], 0.5, 0.4),
        ]);
        let shots = visualize_all(&eval, images.path(), out.path(), false).unwrap();

        let a_file = &shots[0].detections.false_detections[0].file;
        let b_file = &shots[1].detections.false_detections[0].file;
        assert_eq!(a_file, "a/x_fd_0,0-10,10.png");
        assert_eq!(b_file, "b/x_fd_0,0-10,10.png");

        let a_crop = image::open(out.path().join(a_file)).unwrap().to_rgb8();
        let b_crop = image::open(out.path().join(b_file)).unwrap().to_rgb8();
        assert_eq!(*a_crop.get_pixel(5, 5), magenta);
        assert_eq!(*b_crop.get_pixel(5, 5), cyan);
    }

    #[test]
    fn test_detections_get_confidence_labels() {
        let dir = tempdir().unwrap();
        let white = image::Rgb([255, 255, 255]);
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 80, white));
        let ms = MatchSet::new(
            "labels.png",
            &[[10.0, 10.0, 90.0, 40.0, 0.8]],
            &[[10.0, 45.0, 90.0, 75.0]],
            0.5,
            0.4,
        );
        visualize_match_set(&ms, &image, dir.path()).unwrap();

        let annotated = image::open(dir.path().join("labels.png")).unwrap().to_rgb8();
        let interior_inked = |y_range: std::ops::Range<u32>| {
            (12..88u32)
                .flat_map(|x| y_range.clone().map(move |y| (x, y)))
                .any(|(x, y)| *annotated.get_pixel(x, y) != white)
        };
        // 誤検出の枠内にはラベル、見逃しの枠内には何も描かない
        assert!(interior_inked(11..39));
        assert!(!interior_inked(46..74));
    }

    #[test]
    fn test_visualize_all_missing_folder() {
        let out = tempdir().unwrap();
        let eval = Evaluation::new(Vec::new());
        let err = visualize_all(&eval, Path::new("/nonexistent/images"), out.path(), false).unwrap_err();
        assert!(matches!(err, GalleryError::FolderNotFound(_)));
    }
}
