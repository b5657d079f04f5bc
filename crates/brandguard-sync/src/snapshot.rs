//! One-shot initial load of both collections.

use std::sync::Arc;

use tokio::sync::watch;

use crate::client::DashboardClient;
use crate::store::{Batch, SyncStore};

/// How a snapshot load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Both lists fetched and written to the store.
    Loaded { mentions: usize, alerts: usize },
    /// At least one request failed; the store was not touched.
    Failed,
    /// The session was torn down before both requests finished.
    Abandoned,
}

/// Fetches both lists concurrently and replaces the store's collections.
///
/// Both requests always run to completion; a failure in one does not cancel
/// the other. The store is only written when both succeed, so a failed load
/// never leaves one collection from the new snapshot next to a stale other.
/// Failures are logged and reported as [`SnapshotOutcome::Failed`].
///
/// A successful load replaces each collection wholesale. Live items prepended
/// while the requests were in flight are dropped unless the server's lists
/// already include them.
pub async fn load_snapshot(client: &DashboardClient, store: &SyncStore) -> SnapshotOutcome {
    let (mentions, alerts) = tokio::join!(client.list_mentions(), client.list_alerts());

    match (mentions, alerts) {
        (Ok(mentions), Ok(alerts)) => {
            let outcome = SnapshotOutcome::Loaded {
                mentions: mentions.len(),
                alerts: alerts.len(),
            };
            store.replace(Batch::Mentions(mentions));
            store.replace(Batch::Alerts(alerts));
            tracing::info!(?outcome, "snapshot loaded");
            outcome
        }
        (mentions, alerts) => {
            if let Err(e) = mentions {
                tracing::warn!(collection = "mentions", error = %e, "snapshot fetch failed");
            }
            if let Err(e) = alerts {
                tracing::warn!(collection = "alerts", error = %e, "snapshot fetch failed");
            }
            SnapshotOutcome::Failed
        }
    }
}

/// Runs [`load_snapshot`] once and tracks the loading flag around it.
#[derive(Debug)]
pub struct SnapshotLoader {
    client: DashboardClient,
    store: Arc<SyncStore>,
    loading: watch::Sender<bool>,
}

impl SnapshotLoader {
    #[must_use]
    pub fn new(client: DashboardClient, store: Arc<SyncStore>) -> Self {
        let (loading, _) = watch::channel(true);
        Self {
            client,
            store,
            loading,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver for the loading flag; `true` until the load settles.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Loads the snapshot unless `shutdown` fires first.
    ///
    /// The loading flag is cleared however the load ends. Once shutdown is
    /// observed the outstanding requests are dropped and nothing is written.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> SnapshotOutcome {
        let outcome = tokio::select! {
            biased;
            () = crate::shutdown_requested(&mut shutdown) => {
                tracing::debug!("snapshot load abandoned on teardown");
                SnapshotOutcome::Abandoned
            }
            outcome = load_snapshot(&self.client, &self.store) => outcome,
        };
        self.loading.send_replace(false);
        outcome
    }
}
