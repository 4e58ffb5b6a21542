use clap::Parser;
use detection_gallery::{cli, config, error, export, matcher, visualizer};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // RUST_LOG があればそちらを優先
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_summary(evaluation: &matcher::Evaluation) {
    println!("TP: {}", evaluation.tp);
    println!("FN: {}", evaluation.fn_count);
    println!("FP: {}", evaluation.fp);
    println!("Recall: {:.4}", evaluation.recall());
    println!("Precision: {:.4}", evaluation.precision());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Visualize { input, images, output, match_iou, confidence, ui_dir } => {
            println!("detection-gallery - 可視化\n");
            let config = config.with_overrides(match_iou, confidence)?;
            let output = output.unwrap_or_else(|| Commands::default_output(&images));

            // 1. 照合
            println!("[1/3] 検出結果を照合中...");
            let detections = matcher::load_detections(&input)?;
            let evaluation = matcher::match_detections(
                &detections,
                config.confidence_threshold,
                config.match_iou,
            );
            println!("✔ {}枚を照合\n", evaluation.match_sets.len());

            // 2. 描画と切り出し
            println!("[2/3] 画像を書き出し中...");
            let screenshots = visualizer::visualize_all(&evaluation, &images, &output, true)?;
            println!("✔ {}枚を書き出し\n", screenshots.len());

            // 3. data.json とギャラリー
            println!("[3/3] ギャラリーを出力中...");
            let data_path = export::write_data_json(&screenshots, &output)?;
            println!("✔ {}", data_path.display());

            match ui_dir.or(config.ui_dir) {
                Some(dir) => {
                    let copied = export::write_ui_assets(&dir, &output)?;
                    println!("✔ ギャラリーを{}ファイルコピー", copied);
                }
                None => log::warn!("ui_dir が未設定のためギャラリー本体はコピーしません"),
            }

            println!();
            print_summary(&evaluation);
            println!("\n✅ 完了: {}", output.display());
        }

        Commands::Summary { input, match_iou, confidence } => {
            let config = config.with_overrides(match_iou, confidence)?;
            let detections = matcher::load_detections(&input)?;
            let evaluation = matcher::match_detections(
                &detections,
                config.confidence_threshold,
                config.match_iou,
            );
            print_summary(&evaluation);
        }

        Commands::Config { show, set_match_iou, set_confidence, set_ui_dir } => {
            let mut config = config;
            let changed = set_match_iou.is_some() || set_confidence.is_some() || set_ui_dir.is_some();

            if let Some(v) = set_match_iou {
                config.set_match_iou(v)?;
            }
            if let Some(v) = set_confidence {
                config.set_confidence_threshold(v)?;
            }
            if let Some(dir) = set_ui_dir {
                config.set_ui_dir(dir);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  IoU下限: {}", config.match_iou);
                println!("  信頼度の閾値: {}", config.confidence_threshold);
                println!(
                    "  ギャラリー: {}",
                    config
                        .ui_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
            }
        }
    }

    Ok(())
}
