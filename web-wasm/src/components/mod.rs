//! UIコンポーネント

pub mod header;
pub mod mode_buttons;
pub mod filter_panel;
pub mod pager;
pub mod size_slider;
pub mod image_grid;
pub mod magnified;
pub mod messages;
