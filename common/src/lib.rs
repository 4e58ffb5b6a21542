//! Detection Gallery Common Library
//!
//! CLIとWeb(WASM)で共有される型と表示状態

pub mod types;
pub mod config;
pub mod error;
pub mod detection;
pub mod filter;
pub mod element;
pub mod messages;
pub mod mode;
pub mod state;

pub use types::{BoxEntry, DetectionBoxes, GroundTruthBoxes, Screenshot, SimilarFragment, SimilarsMap};
pub use config::GalleryConfig;
pub use error::{Error, Result};
pub use detection::{flatten_detections, DetectionKind, DetectionRecord};
pub use filter::{FilterCache, Filters};
pub use element::{Action, Element, ImageSpec, Magnified};
pub use messages::{Message, MessageBus, MessageId, MessageKind};
pub use mode::{DetectionsMode, Mode, ModeControl, ModeKind, ModeName, ModeView, ScreenshotsMode};
pub use state::{AppState, Modes, Phase};
