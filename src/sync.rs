use crate::http_client::TransportError;

pub mod reconciler;
pub mod snapshot;
pub mod sync_job;

pub use reconciler::{reconcile, EntityStore, ReconcileStats};
pub use snapshot::{Snapshot, SnapshotIndicator, SnapshotItem};
pub use sync_job::SyncJob;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to fetch the snapshot: {0}")]
    Transport(#[from] TransportError),
    #[error("invalid snapshot: {msg}")]
    Validation { msg: String },
    #[error("failed to store the snapshot: {0}")]
    Persistence(#[from] diesel::result::Error),
}
