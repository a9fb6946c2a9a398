//! Shared, reloadable application configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{AppConfig, SettingsError};

/// Current configuration plus the file it is persisted to.
///
/// Readers take an `Arc` snapshot, so a reload or settings update never
/// changes a request that is already running.
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Arc<AppConfig>>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Load from `path`, creating it with defaults when missing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Err(e) = AppConfig::ensure_exists(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not create config file");
        }
        let config = AppConfig::load(&path);
        Self::new(path, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Arc<AppConfig> {
        self.current.read().await.clone()
    }

    /// Re-read the file. Invalid content keeps the previous configuration.
    pub async fn reload(&self) -> Arc<AppConfig> {
        let loaded = AppConfig::load(&self.path);
        if let Err(e) = loaded.validate() {
            tracing::warn!(error = %e, "Reloaded configuration is invalid, keeping previous");
            return self.snapshot().await;
        }

        let mut current = self.current.write().await;
        if **current != loaded {
            tracing::info!(album = %loaded.immich.album, "Configuration reloaded");
            *current = Arc::new(loaded);
        }
        current.clone()
    }

    /// Validate, persist and apply `config`.
    pub async fn save(&self, config: AppConfig) -> Result<Arc<AppConfig>, SettingsError> {
        config.validate()?;
        let mut current = self.current.write().await;
        config.save(&self.path)?;
        let config = Arc::new(config);
        *current = config.clone();
        tracing::info!(path = %self.path.display(), "Configuration saved");
        Ok(config)
    }
}
