//! データ取得

pub mod loader;

pub use loader::load_data;
