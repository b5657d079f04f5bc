//! Wires the snapshot loader, the live stream and the store into one session.

use std::sync::Arc;

use brandguard_core::AppConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::DashboardClient;
use crate::error::SyncError;
use crate::snapshot::{SnapshotLoader, SnapshotOutcome};
use crate::store::SyncStore;
use crate::stream::{ConnectionState, LiveStream, StreamExit};

/// Endpoints a session talks to.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub api_base: String,
    pub ws_base: String,
    pub user_agent: String,
}

impl SessionConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_base: config.api_base.to_string(),
            ws_base: config.ws_base.to_string(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// A running dashboard session.
///
/// Starting a session spawns the snapshot load and the live stream as two
/// independent tasks. [`Session::teardown`] is the only way to stop them.
#[derive(Debug)]
pub struct Session {
    store: Arc<SyncStore>,
    loader: Arc<SnapshotLoader>,
    stream: Arc<LiveStream>,
    shutdown: watch::Sender<bool>,
    snapshot_task: JoinHandle<SnapshotOutcome>,
    stream_task: JoinHandle<StreamExit>,
}

/// How the session's two activities ended, as seen by [`Session::teardown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub snapshot: Option<SnapshotOutcome>,
    pub stream: Option<StreamExit>,
}

impl Session {
    /// Starts both activities on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the HTTP client cannot be built for
    /// `config.api_base`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(config: &SessionConfig) -> Result<Self, SyncError> {
        let client = DashboardClient::new(&config.api_base, &config.user_agent)?;
        let store = Arc::new(SyncStore::new());
        let loader = Arc::new(SnapshotLoader::new(client, Arc::clone(&store)));
        let stream = Arc::new(LiveStream::new(
            config.ws_base.clone(),
            Arc::clone(&store),
        ));
        let (shutdown, shutdown_rx) = watch::channel(false);

        tracing::info!(
            api_base = %config.api_base,
            ws_base = %config.ws_base,
            "starting dashboard session"
        );

        let snapshot_task = {
            let loader = Arc::clone(&loader);
            let shutdown_rx = shutdown_rx.clone();
            tokio::spawn(async move { loader.run(shutdown_rx).await })
        };
        let stream_task = {
            let stream = Arc::clone(&stream);
            tokio::spawn(async move { stream.run(shutdown_rx).await })
        };

        Ok(Self {
            store,
            loader,
            stream,
            shutdown,
            snapshot_task,
            stream_task,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SyncStore> {
        &self.store
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loader.loading()
    }

    /// The liveness flag.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.stream.state().is_connected()
    }

    #[must_use]
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.stream.subscribe()
    }

    /// Stops the session and waits for both tasks to finish.
    ///
    /// An open push connection receives one close request; an outstanding
    /// snapshot load is dropped without touching the store. After this
    /// returns the store is never mutated again.
    pub async fn teardown(self) -> SessionReport {
        self.shutdown.send_replace(true);

        let snapshot = match self.snapshot_task.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "snapshot task failed");
                None
            }
        };
        let stream = match self.stream_task.await {
            Ok(exit) => Some(exit),
            Err(e) => {
                tracing::error!(error = %e, "live stream task failed");
                None
            }
        };

        tracing::info!(?snapshot, ?stream, "dashboard session torn down");
        SessionReport { snapshot, stream }
    }
}
