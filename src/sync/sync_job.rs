use crate::config::Config;
use crate::http_client;
use crate::sync::reconciler::{self, EntityStore, ReconcileStats};
use crate::sync::snapshot::Snapshot;
use crate::sync::SyncError;
use log::{error, info};

/// Fetches a snapshot from the server and reconciles it into a store.
#[derive(Debug, Clone)]
pub struct SyncJob {
    url: String,
}

impl Default for SyncJob {
    fn default() -> Self {
        Self::new(Config::snapshot_url())
    }
}

impl SyncJob {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn execute<S: EntityStore>(&self, store: &mut S) -> Result<ReconcileStats, SyncError> {
        info!("Fetching data from {}", self.url);

        let payload = http_client::get_json(&self.url).map_err(|err| {
            error!("Failed to fetch data from {}: {}", self.url, err);
            err
        })?;

        let snapshot = Snapshot::parse(&payload);

        info!(
            "Parsed snapshot with {} items (count {}, seqUpdate {:?})",
            snapshot.items.len(),
            snapshot.count,
            snapshot.seq_update
        );

        match reconciler::reconcile(&snapshot, store) {
            Ok(stats) => {
                info!(
                    "Stored snapshot: {} items created, {} items updated, {} indicators created, {} indicators unchanged",
                    stats.items_created,
                    stats.items_updated,
                    stats.indicators_created,
                    stats.indicators_unchanged
                );

                Ok(stats)
            }
            Err(err) => {
                error!("Failed to store snapshot from {}: {}", self.url, err);

                Err(err)
            }
        }
    }
}
