//! Produce the next frame for the display.

use std::sync::Arc;
use thiserror::Error;

use crate::models::{AppConfig, Asset, SettingsError};
use crate::services::album_client::{AlbumError, AlbumSource};
use crate::services::decoder::decode;
use crate::services::selection::select;
use crate::services::TrackingLedger;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Album not found")]
    AlbumNotFound(String),

    #[error("No images found in album")]
    EmptyAlbum(String),

    #[error(transparent)]
    Album(#[from] AlbumError),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("image conversion failed: {0}")]
    Codec(#[from] epd_codec::CodecError),

    #[error("tracking ledger error: {0}")]
    Ledger(#[from] std::io::Error),

    #[error("conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One converted photo, ready to send to the display.
#[derive(Debug, Clone)]
pub struct Frame {
    pub asset_id: String,
    /// Packed panel codes as C array text
    pub text: String,
}

impl Frame {
    pub fn file_name(&self) -> String {
        format!("image_{}.c", self.asset_id)
    }
}

pub struct FrameService {
    albums: Arc<dyn AlbumSource>,
    ledger: TrackingLedger,
}

impl FrameService {
    pub fn new(albums: Arc<dyn AlbumSource>, ledger: TrackingLedger) -> Self {
        Self { albums, ledger }
    }

    pub fn ledger(&self) -> &TrackingLedger {
        &self.ledger
    }

    /// Pick the next photo of the configured album, mark it as shown and
    /// convert it for the panel.
    pub async fn next_frame(&self, config: &AppConfig) -> Result<Frame, FrameError> {
        let render = config.render_config()?;
        let order = config.image_order()?;
        let settings = &config.immich;
        let album_name = settings.album.as_str();

        let albums = self.albums.list_albums(&settings.url).await?;
        let album_id = albums
            .into_iter()
            .find(|a| a.album_name == album_name)
            .map(|a| a.id)
            .ok_or_else(|| FrameError::AlbumNotFound(album_name.to_string()))?;

        let detail = self.albums.album(&settings.url, &album_id).await?;
        let shown = self.ledger.load(album_name).await?;

        let (asset, reset_ledger): (Asset, bool) = {
            let mut rng = rand::thread_rng();
            select(&detail.assets, &shown, order, &mut rng)
                .map(|s| (s.asset.clone(), s.reset_ledger))
                .ok_or_else(|| FrameError::EmptyAlbum(album_name.to_string()))?
        };
        if reset_ledger {
            self.ledger.reset(album_name).await?;
        }
        self.ledger.record(album_name, &asset.id).await?;

        tracing::info!(
            album = album_name,
            asset_id = %asset.id,
            %order,
            shown = shown.len(),
            total = detail.assets.len(),
            "Selected photo"
        );

        let bytes = self
            .albums
            .download_original(&settings.url, &asset.id)
            .await?;
        let extension = asset.extension();

        let packed = tokio::task::spawn_blocking(move || {
            let decoded = decode(&bytes, extension.as_deref())?;
            epd_codec::convert(&decoded.pixels, decoded.orientation, &render)
        })
        .await??;

        Ok(Frame {
            asset_id: asset.id,
            text: packed.to_c_array(),
        })
    }
}
