//! Live push connection.
//!
//! [`LiveStream`] opens a single WebSocket connection, applies every
//! recognised frame to the store in arrival order and tracks whether the
//! connection is up. It never reconnects: once the connection closes or fails
//! the stream stays [`ConnectionState::Disconnected`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::SyncError;
use crate::frame::parse_frame;
use crate::store::SyncStore;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    #[must_use]
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// Why [`LiveStream::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamExit {
    /// The connection could not be established.
    ConnectFailed,
    /// The server closed the connection.
    PeerClosed,
    /// The transport failed after the connection was up.
    TransportError,
    /// Shutdown was requested; a close frame was sent if a connection was open.
    TornDown,
    /// `run` had already been called on this stream.
    AlreadyStarted,
}

#[derive(Debug)]
pub struct LiveStream {
    endpoint: String,
    store: Arc<SyncStore>,
    state: watch::Sender<ConnectionState>,
    started: AtomicBool,
}

impl LiveStream {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, store: Arc<SyncStore>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            endpoint: endpoint.into(),
            store,
            state,
            started: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Receiver notified on every connection-state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Connects and processes frames until the connection ends or `shutdown`
    /// fires (or its sender is dropped).
    ///
    /// Frames are handled strictly one at a time. On shutdown exactly one
    /// close request is sent and no later frame is applied.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> StreamExit {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!(endpoint = %self.endpoint, "live stream already started; not reconnecting");
            return StreamExit::AlreadyStarted;
        }

        let mut ws = tokio::select! {
            biased;
            () = crate::shutdown_requested(&mut shutdown) => return StreamExit::TornDown,
            connected = self.connect() => match connected {
                Ok(ws) => ws,
                Err(e) => {
                    tracing::error!(endpoint = %self.endpoint, error = %e, "push connection failed");
                    return StreamExit::ConnectFailed;
                }
            },
        };

        self.state.send_replace(ConnectionState::Connected);
        tracing::info!(endpoint = %self.endpoint, "push connection established");

        let exit = loop {
            tokio::select! {
                biased;
                () = crate::shutdown_requested(&mut shutdown) => {
                    if let Err(e) = ws.close(None).await {
                        tracing::debug!(error = %e, "close request failed");
                    }
                    tracing::info!(endpoint = %self.endpoint, "push connection closed on teardown");
                    break StreamExit::TornDown;
                }
                message = ws.next() => match message {
                    Some(Ok(Message::Text(text))) => self.apply_frame(&text),
                    Some(Ok(Message::Binary(bytes))) => {
                        tracing::warn!(len = bytes.len(), "discarding binary push frame");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "push connection closed by server");
                        break StreamExit::PeerClosed;
                    }
                    // Ping/pong are answered by tungstenite itself.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "push connection error");
                        break StreamExit::TransportError;
                    }
                    None => {
                        tracing::info!("push connection ended");
                        break StreamExit::PeerClosed;
                    }
                },
            }
        };

        self.state.send_replace(ConnectionState::Disconnected);
        exit
    }

    async fn connect(&self) -> Result<WsStream, SyncError> {
        let (ws, _) = tokio_tungstenite::connect_async(self.endpoint.as_str()).await?;
        Ok(ws)
    }

    fn apply_frame(&self, payload: &str) {
        match parse_frame(payload) {
            Ok(Some(item)) => self.store.prepend(item),
            Ok(None) => tracing::debug!("ignoring push frame with unrecognised shape"),
            Err(e) => tracing::warn!(error = %e, payload, "discarding non-JSON push frame"),
        }
    }
}
