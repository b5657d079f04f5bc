//! Live state synchronization for the BrandGuard dashboard.
//!
//! Loads the initial mention and alert lists over HTTP, keeps one WebSocket
//! open for incremental updates, and merges both into a [`SyncStore`] that
//! renderers read from. Nothing here retries, reconnects, sorts or
//! deduplicates; failures are logged and leave state unchanged.

pub mod client;
pub mod error;
pub mod frame;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod stream;

use tokio::sync::watch;

pub use client::DashboardClient;
pub use error::SyncError;
pub use frame::parse_frame;
pub use session::{Session, SessionConfig, SessionReport};
pub use snapshot::{load_snapshot, SnapshotLoader, SnapshotOutcome};
pub use store::{Batch, Item, SyncStore};
pub use stream::{ConnectionState, LiveStream, StreamExit};

/// Resolves once `true` is published on `shutdown` or its sender is dropped.
pub(crate) async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender is treated as a shutdown request.
    let _ = shutdown.wait_for(|stop| *stop).await;
}
