//! Hot reload of the configuration file.
//!
//! Watches the directory holding the config file (editors often replace the
//! file rather than write it in place), debounces bursts of events, reloads
//! the [`ConfigStore`] and broadcasts the result.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

use crate::models::AppConfig;
use crate::services::ConfigStore;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Sent after each debounced reload
#[derive(Debug, Clone)]
pub struct ConfigReloaded {
    pub config: Arc<AppConfig>,
}

pub struct ConfigWatcher {
    sender: broadcast::Sender<ConfigReloaded>,
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    active: bool,
}

impl ConfigWatcher {
    /// Start watching the store's file. Failure to watch is logged and
    /// leaves hot reload disabled.
    pub fn new(store: Arc<ConfigStore>) -> Self {
        let (sender, _) = broadcast::channel(16);
        let path = store.path().to_path_buf();

        let (watcher, active) = match Self::start_watcher(&path, store, sender.clone()) {
            Ok(watcher) => {
                tracing::info!(path = %path.display(), "Config watcher started");
                (Some(watcher), true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start config watcher");
                (None, false)
            }
        };

        Self {
            sender,
            _watcher: watcher,
            active,
        }
    }

    fn start_watcher(
        path: &Path,
        store: Arc<ConfigStore>,
        sender: broadcast::Sender<ConfigReloaded>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        let file_name = path.file_name().map(|n| n.to_os_string());

        let (tx, rx) = mpsc::channel::<()>(100);

        tokio::spawn(debounce(rx, DEBOUNCE, move || {
            let store = store.clone();
            let sender = sender.clone();
            async move {
                let config = store.reload().await;
                tracing::debug!("Config file changed (debounced)");
                let _ = sender.send(ConfigReloaded { config });
            }
        }));

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config {
                        let _ = tx.blocking_send(());
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigReloaded> {
        self.sender.subscribe()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Run `on_settle` once per burst of events on `rx`, after `quiet` has
/// passed without a further event. Returns when the channel closes.
async fn debounce<F, Fut>(mut rx: mpsc::Receiver<()>, quiet: Duration, mut on_settle: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    while rx.recv().await.is_some() {
        // Every further event restarts the quiet period
        let closed = loop {
            match tokio::time::timeout(quiet, rx.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => break true,
                Err(_) => break false,
            }
        };
        on_settle().await;
        if closed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn counting_debounce(quiet: Duration) -> (mpsc::Sender<()>, Arc<AtomicUsize>) {
        let (tx, rx) = mpsc::channel(100);
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        tokio::spawn(debounce(rx, quiet, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));
        (tx, count)
    }

    #[tokio::test]
    async fn test_debounce_waits_for_quiet_after_last_event() {
        let (tx, count) = counting_debounce(Duration::from_millis(150));

        // A steady stream shorter than the quiet period between events
        for _ in 0..8 {
            tx.send(()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0, "fired mid-burst");

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_debounce_fires_once_per_burst() {
        let (tx, count) = counting_debounce(Duration::from_millis(50));

        for _ in 0..2 {
            for _ in 0..3 {
                tx.send(()).await.unwrap();
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_debounce_flushes_on_close() {
        let (tx, count) = counting_debounce(Duration::from_secs(60));
        tx.send(()).await.unwrap();
        drop(tx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_edit_triggers_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let store = Arc::new(ConfigStore::open(&path));
        let watcher = ConfigWatcher::new(store.clone());
        assert!(watcher.is_active());
        let mut events = watcher.subscribe();

        std::fs::write(&path, "immich:\n  album: Garden\n").unwrap();

        // A write can surface as several events; wait for the final content
        let reloaded = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event = events.recv().await.unwrap();
                if event.config.immich.album == "Garden" {
                    break;
                }
            }
        })
        .await;
        assert!(reloaded.is_ok(), "no reload within timeout");
        assert_eq!(store.snapshot().await.immich.album, "Garden");
    }
}
