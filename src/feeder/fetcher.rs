use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::FetchError;
use crate::snapshot::{ingest, Snapshot, SnapshotStore, LOOKBACK_HOURS};
use crate::web::config::SourceConfig;

pub type SharedStore = Arc<RwLock<SnapshotStore>>;

pub fn snapshot_url(base_url: &str, offset: usize) -> String {
    format!("{}/{:02}.json", base_url.trim_end_matches('/'), offset)
}

/// Pulls the hourly snapshot files into the shared store. Every offset is
/// fetched once; offset 0 is then refreshed on `refresh_interval`.
#[derive(Clone)]
pub struct Feeder {
    client: reqwest::Client,
    source: SourceConfig,
    store: SharedStore,
}

impl Feeder {
    pub fn new(source: SourceConfig, store: SharedStore) -> Result<Self, FetchError> {
        source.validate()?;
        let client = reqwest::Client::builder()
            .timeout(source.request_timeout)
            .build()?;
        Ok(Self {
            client,
            source,
            store,
        })
    }

    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        let hours = self.source.lookback_hours.min(LOOKBACK_HOURS);
        let mut handles = Vec::with_capacity(hours);

        let live = self.clone();
        handles.push(tokio::spawn(async move { live.refresh_latest().await }));

        for offset in 1..hours {
            let feeder = self.clone();
            handles.push(tokio::spawn(async move {
                feeder.fetch_logged(offset).await;
            }));
        }

        handles
    }

    async fn refresh_latest(self) {
        let mut ticker = interval(self.source.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.fetch_logged(0).await;
        }
    }

    async fn fetch_logged(&self, offset: usize) {
        match self.fetch(offset).await {
            Ok(true) => {}
            Ok(false) => debug!("Offset {} superseded by a newer fetch", offset),
            Err(e) => warn!("Failed to fetch snapshot for offset {}: {}", offset, e),
        }
    }

    /// Fetch and store one offset. Returns false if a newer request for the
    /// same offset already landed.
    pub async fn fetch(&self, offset: usize) -> Result<bool, FetchError> {
        let requested_at = Utc::now();
        let url = snapshot_url(&self.source.base_url, offset);

        let raw: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let snapshot = Snapshot::new(ingest::ingest(&raw)?, requested_at);
        if snapshot.is_empty() {
            warn!("Offset {} returned no valid positions", offset);
        }
        let count = snapshot.len();

        let stored = self
            .store
            .write()
            .await
            .replace_if_newer(offset, snapshot)?;

        if stored {
            info!("Stored {} balloons for offset {}", count, offset);
        }
        Ok(stored)
    }
}
