use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, warn};

use crate::{error::SyncError, types::AnalyticsCounters};

/// Document store holding the usage counters.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Adds `delta` to the counters document, creating it if needed.
    async fn increment(&self, delta: &AnalyticsCounters) -> Result<(), SyncError>;

    /// The counters document, if anything was ever recorded.
    async fn load(&self) -> Result<Option<AnalyticsCounters>, SyncError>;

    /// Where the document lives, for log messages.
    fn location(&self) -> String;
}

/// Single JSON document on disk.
///
/// Read-modify-write cycles are serialized by a lock and the new document is
/// written to a sibling file first, then renamed over the old one.
pub struct JsonDocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read(&self) -> Result<Option<AnalyticsCounters>, SyncError> {
        let json = match async_fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SyncError::Io(e)),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| SyncError::Store(format!("{}: {e}", self.path.display())))
    }

    async fn write(&self, counters: &AnalyticsCounters) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(counters)
            .map_err(|e| SyncError::Store(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AnalyticsStore for JsonDocumentStore {
    async fn increment(&self, delta: &AnalyticsCounters) -> Result<(), SyncError> {
        let _guard = self.lock.lock().await;
        let mut counters = self.read().await?.unwrap_or_default();
        counters.add(delta);
        self.write(&counters).await
    }

    async fn load(&self) -> Result<Option<AnalyticsCounters>, SyncError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fire-and-forget front of an [`AnalyticsStore`].
#[derive(Clone, Default)]
pub struct AnalyticsSink {
    store: Option<Arc<dyn AnalyticsStore>>,
}

impl AnalyticsSink {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Records `delta` on a background task.
    ///
    /// Failures are logged and dropped. The handle is only useful to callers
    /// that want to wait for the write, such as tests.
    pub fn record(&self, delta: AnalyticsCounters) -> Option<JoinHandle<()>> {
        let store = Arc::clone(self.store.as_ref()?);

        Some(tokio::spawn(async move {
            match store.increment(&delta).await {
                Ok(()) => debug!(songs = delta.meso_songs_converted, "analytics.recorded"),
                Err(e) => warn!(
                    store = %store.location(),
                    error = %e,
                    "analytics.update.failed"
                ),
            }
        }))
    }

    pub async fn snapshot(&self) -> Result<Option<AnalyticsCounters>, SyncError> {
        match &self.store {
            Some(store) => store.load().await,
            None => Err(SyncError::Store("analytics are disabled".to_string())),
        }
    }
}
