pub mod album_client;
pub mod battery;
pub mod config_store;
pub mod decoder;
pub mod file_watcher;
pub mod frame;
pub mod scheduler;
pub mod selection;
pub mod tracking;

pub use album_client::{AlbumError, AlbumSource, ImmichClient};
pub use battery::BatteryMonitor;
pub use config_store::ConfigStore;
pub use file_watcher::{ConfigReloaded, ConfigWatcher};
pub use frame::{Frame, FrameError, FrameService};
pub use scheduler::{plan_sleep, SleepPlan};
pub use selection::ImageOrder;
pub use tracking::TrackingLedger;
