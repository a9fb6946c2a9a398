use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Entry of `GET /api/albums`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    pub album_name: String,
}

/// Body of `GET /api/albums/{id}`; only the asset list is used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetail {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A photo in an album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,

    /// Path on the album server; its extension tells RAW and HEIC apart
    #[serde(default)]
    pub original_path: String,

    #[serde(default)]
    pub exif_info: Option<ExifInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifInfo {
    #[serde(default)]
    pub date_time_original: Option<String>,
}

impl Asset {
    pub fn new(id: impl Into<String>, original_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_path: original_path.into(),
            exif_info: None,
        }
    }

    pub fn with_taken_at(mut self, timestamp: impl Into<String>) -> Self {
        self.exif_info = Some(ExifInfo {
            date_time_original: Some(timestamp.into()),
        });
        self
    }

    /// Capture time, or the Unix epoch when missing or unparseable.
    pub fn taken_at(&self) -> DateTime<FixedOffset> {
        self.exif_info
            .as_ref()
            .and_then(|exif| exif.date_time_original.as_deref())
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
    }

    /// Lowercased file extension of the original.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.original_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}
