use epd_codec::{
    ConfigError, DisplayMode, HardwareTarget, Palette, PaletteError, RenderConfig, Rotation,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::selection::ImageOrder;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Album source and photo rendering settings
    #[serde(default)]
    pub immich: ImmichSettings,

    /// Panel geometry and inks
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Settings editable from the `/settings` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ImmichSettings {
    /// Immich server base URL
    pub url: String,
    /// Name of the album to show photos from
    pub album: String,
    /// Panel rotation in degrees: 0, 90, 180 or 270
    pub rotation: u16,
    /// Saturation factor (1.0 = unchanged)
    pub enhanced: f32,
    /// Contrast factor (1.0 = unchanged)
    pub contrast: f32,
    /// Dithering strength, 0.0 to 1.0
    pub strength: f32,
    /// "fit" or "fill"
    pub display_mode: String,
    /// "random" or "newest"
    pub image_order: String,
    pub sleep_start_hour: u32,
    pub sleep_start_minute: u32,
    pub sleep_end_hour: u32,
    pub sleep_end_minute: u32,
    /// Minutes between wakeups
    pub wakeup_interval: u32,
}

impl Default for ImmichSettings {
    fn default() -> Self {
        Self {
            url: "http://192.168.1.10".to_string(),
            album: "default_album".to_string(),
            rotation: 270,
            enhanced: 1.3,
            contrast: 0.9,
            strength: 0.8,
            display_mode: "fill".to_string(),
            image_order: "random".to_string(),
            sleep_start_hour: 23,
            sleep_start_minute: 0,
            sleep_end_hour: 6,
            sleep_end_minute: 0,
            wakeup_interval: 60,
        }
    }
}

/// Physical panel description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    /// "acep7" or "spectra6"
    pub panel: String,
    /// Calibrated inks replacing the panel preset, in preset order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            panel: "acep7".to_string(),
            colors: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Render(#[from] ConfigError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("unknown image order '{0}' (expected random or newest)")]
    UnknownImageOrder(String),

    #[error("wakeup interval must be at least one minute")]
    ZeroWakeupInterval,

    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("failed to read or write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        album = %config.immich.album,
                        panel = %config.display.panel,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the defaults to `path` unless a file is already there.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_exists(path: &Path) -> Result<bool, SettingsError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save(path)?;
        tracing::info!(path = %path.display(), "Created default configuration file");
        Ok(true)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Reject settings that would make rendering or scheduling fail later.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let s = &self.immich;
        Rotation::try_from(s.rotation)?;
        DisplayMode::from_str(&s.display_mode)?;
        self.image_order()?;
        if s.wakeup_interval == 0 {
            return Err(SettingsError::ZeroWakeupInterval);
        }
        check_max("wakeup_interval", s.wakeup_interval, MAX_WAKEUP_INTERVAL)?;
        check_max("sleep_start_hour", s.sleep_start_hour, 23)?;
        check_max("sleep_end_hour", s.sleep_end_hour, 23)?;
        check_max("sleep_start_minute", s.sleep_start_minute, 59)?;
        check_max("sleep_end_minute", s.sleep_end_minute, 59)?;
        self.render_config()?.validate()?;
        Ok(())
    }

    pub fn image_order(&self) -> Result<ImageOrder, SettingsError> {
        ImageOrder::from_str(&self.immich.image_order)
            .map_err(|_| SettingsError::UnknownImageOrder(self.immich.image_order.clone()))
    }

    /// Build the codec settings for one conversion.
    pub fn render_config(&self) -> Result<RenderConfig, SettingsError> {
        let s = &self.immich;
        let hardware = HardwareTarget::from_str(&self.display.panel)?;
        let mut config = RenderConfig::new(self.display.width, self.display.height)
            .rotation(Rotation::try_from(s.rotation)?)
            .mode(DisplayMode::from_str(&s.display_mode)?)
            .saturation(s.enhanced)
            .contrast(s.contrast)
            .strength(s.strength)
            .hardware(hardware);

        if let Some(colors) = &self.display.colors {
            let colors: Vec<&str> = colors.iter().map(String::as_str).collect();
            config = config.palette(Arc::new(Palette::from_hex(&colors)?));
        }
        Ok(config)
    }
}

/// One wakeup a day, in minutes
const MAX_WAKEUP_INTERVAL: u32 = 24 * 60;

fn check_max(field: &'static str, value: u32, max: u32) -> Result<(), SettingsError> {
    if value > max {
        return Err(SettingsError::OutOfRange { field, value, max });
    }
    Ok(())
}
