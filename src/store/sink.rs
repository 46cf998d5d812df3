//! Progress sink that persists into a [`SnapshotStore`]

use super::SnapshotStore;
use crate::capture::ProgressSink;
use crate::model::CapturedPlaylist;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Writes status text and snapshots to the store
///
/// Writes run on the blocking pool so the capture loop only yields while
/// they are in flight.
#[derive(Debug, Clone)]
pub struct StoreSink {
    store: SnapshotStore,
}

impl StoreSink {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProgressSink for StoreSink {
    async fn report_status(&self, text: &str) -> Result<()> {
        let store = self.store.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || store.save_status(&text))
            .await
            .context("Status write task failed")?
    }

    async fn report_snapshot(&self, snapshot: &CapturedPlaylist) -> Result<()> {
        let store = self.store.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || store.save_playlist(&snapshot))
            .await
            .context("Snapshot write task failed")?
    }
}
