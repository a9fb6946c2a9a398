pub mod asset;
pub mod config;

pub use asset::{AlbumDetail, AlbumSummary, Asset, ExifInfo};
pub use config::{AppConfig, DisplaySettings, ImmichSettings, SettingsError};
