use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "detection-gallery")]
#[command(about = "検出結果を照合し、レビュー用ギャラリーを生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 照合して枠線画像・切り出し画像・data.json を出力
    Visualize {
        /// 検出結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// スクリーンショットのフォルダ
        #[arg(long, required = true)]
        images: PathBuf,

        /// 出力ディレクトリ（デフォルト: 画像フォルダ/visualizations）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 対応付けのIoU下限（設定値を上書き）
        #[arg(long)]
        match_iou: Option<f64>,

        /// 信頼度の閾値（設定値を上書き）
        #[arg(long)]
        confidence: Option<f64>,

        /// ビルド済みギャラリーのディレクトリ（設定値を上書き）
        #[arg(long)]
        ui_dir: Option<PathBuf>,
    },

    /// 照合結果の集計を表示
    Summary {
        /// 検出結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 対応付けのIoU下限（設定値を上書き）
        #[arg(long)]
        match_iou: Option<f64>,

        /// 信頼度の閾値（設定値を上書き）
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// IoU下限を設定
        #[arg(long)]
        set_match_iou: Option<f64>,

        /// 信頼度の閾値を設定
        #[arg(long)]
        set_confidence: Option<f64>,

        /// ギャラリーのディレクトリを設定
        #[arg(long)]
        set_ui_dir: Option<PathBuf>,
    },
}

impl Commands {
    /// 出力ディレクトリの既定値
    pub fn default_output(images: &std::path::Path) -> PathBuf {
        images.join("visualizations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_visualize() {
        let cli = Cli::parse_from([
            "detection-gallery",
            "visualize",
            "det.json",
            "--images",
            "shots",
            "--match-iou",
            "0.5",
        ]);
        match cli.command {
            Commands::Visualize { input, images, output, match_iou, confidence, ui_dir } => {
                assert_eq!(input, PathBuf::from("det.json"));
                assert_eq!(images, PathBuf::from("shots"));
                assert!(output.is_none());
                assert_eq!(match_iou, Some(0.5));
                assert!(confidence.is_none());
                assert!(ui_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_visualize_requires_images() {
        assert!(Cli::try_parse_from(["detection-gallery", "visualize", "det.json"]).is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["detection-gallery", "summary", "det.json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Summary { .. }));
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["detection-gallery", "config", "--show", "--set-confidence", "0.3"]);
        match cli.command {
            Commands::Config { show, set_confidence, set_match_iou, .. } => {
                assert!(show);
                assert_eq!(set_confidence, Some(0.3));
                assert!(set_match_iou.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            Commands::default_output(std::path::Path::new("shots")),
            PathBuf::from("shots").join("visualizations")
        );
    }
}
