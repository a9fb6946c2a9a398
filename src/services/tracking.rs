//! Persistent record of the photos shown in the current cycle.
//!
//! The ledger is a plain text file: the album name on the first line, then
//! one asset id per line. Switching albums discards the old entries.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const LEDGER_FILE: &str = "tracking.txt";

pub struct TrackingLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TrackingLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Ledger stored as `tracking.txt` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LEDGER_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids already shown for `album`.
    ///
    /// A missing file, or one written for another album, yields an empty set;
    /// in the latter case the file is restarted for `album`.
    pub async fn load(&self, album: &str) -> io::Result<HashSet<String>> {
        let _guard = self.lock.lock().await;
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e),
        };

        let mut lines = content.lines();
        match lines.next() {
            Some(header) if header.trim() == album => Ok(lines
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Some(header) => {
                tracing::info!(previous = header.trim(), album, "Album changed, restarting ledger");
                self.write_header(album).await?;
                Ok(HashSet::new())
            }
            None => Ok(HashSet::new()),
        }
    }

    /// Append `asset_id`. A new file, or one kept for another album, is
    /// restarted with `album` as its header first.
    pub async fn record(&self, album: &str, asset_id: &str) -> io::Result<()> {
        let _guard = self.lock.lock().await;
        let needs_header = match fs::read_to_string(&self.path).await {
            Ok(content) => content.lines().next().map(str::trim) != Some(album),
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e),
        };
        if needs_header {
            self.write_header(album).await?;
        }

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{asset_id}\n").as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Forget every shown id, keeping `album` as the header.
    pub async fn reset(&self, album: &str) -> io::Result<()> {
        let _guard = self.lock.lock().await;
        tracing::debug!(album, "Resetting ledger");
        self.write_header(album).await
    }

    async fn write_header(&self, album: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        fs::write(&self.path, format!("{album}\n")).await
    }
}
