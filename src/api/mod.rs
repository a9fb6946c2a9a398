pub mod download;
pub mod settings;
pub mod sleep;

pub use download::{handle_download, __path_handle_download};
pub use settings::{handle_get_settings, handle_update_settings, SettingsResponse, SettingsUpdate};
pub use settings::{__path_handle_get_settings, __path_handle_update_settings};
pub use sleep::{handle_sleep, __path_handle_sleep};
