//! Shared fixtures for the integration tests.
//!
//! [`PushServer`] accepts a single WebSocket client on `127.0.0.1` and sends
//! whatever the test tells it to. It counts the close frames the client sends
//! and reports the total once the connection is gone.

#![allow(dead_code)]

use std::time::Duration;

use brandguard_core::{Alert, Mention};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

pub const WAIT: Duration = Duration::from_secs(5);

enum Command {
    Send(Message),
    Close,
}

pub struct PushServer {
    pub url: String,
    commands: mpsc::UnboundedSender<Command>,
    finished: oneshot::Receiver<usize>,
}

impl PushServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let (commands, mut rx) = mpsc::unbounded_channel();
        let (done_tx, finished) = oneshot::channel();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.expect("accept client");
            let ws = tokio_tungstenite::accept_async(tcp)
                .await
                .expect("websocket handshake");
            let (mut sink, mut source) = ws.split();
            let mut closes = 0usize;
            let mut commands_open = true;

            loop {
                tokio::select! {
                    cmd = rx.recv(), if commands_open => match cmd {
                        Some(Command::Send(msg)) => {
                            if sink.send(msg).await.is_err() {
                                break;
                            }
                        }
                        Some(Command::Close) => {
                            let _ = sink.send(Message::Close(None)).await;
                        }
                        None => commands_open = false,
                    },
                    msg = source.next() => match msg {
                        Some(Ok(Message::Close(_))) => closes += 1,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    },
                }
            }

            let _ = done_tx.send(closes);
        });

        Self {
            url: format!("ws://{addr}"),
            commands,
            finished,
        }
    }

    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.commands.send(Command::Send(Message::Text(text.into())));
    }

    pub fn send_binary(&self, bytes: Vec<u8>) {
        let _ = self.commands.send(Command::Send(Message::Binary(bytes)));
    }

    pub fn send_json(&self, value: &Value) {
        self.send_text(value.to_string());
    }

    /// Starts a server-initiated close.
    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }

    /// Waits for the client connection to end and returns how many close
    /// frames the client sent.
    pub async fn client_closes(self) -> usize {
        tokio::time::timeout(WAIT, self.finished)
            .await
            .expect("connection should end")
            .expect("server task should report")
    }
}

/// Returns a `ws://` URL on which nothing is listening.
pub async fn unused_ws_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("ws://{addr}")
}

pub fn mention_json(id: i64) -> Value {
    json!({
        "id": id,
        "source": "twitter",
        "source_id": format!("mock-{id}"),
        "author": "user_1",
        "text": format!("mention number {id}"),
        "url": "https://twitter.com/mock/1",
        "published_at": "2025-11-14T18:30:00",
        "sentiment": "positive",
        "reach": 500.0,
        "cluster_id": null
    })
}

pub fn alert_json(id: i64) -> Value {
    json!({
        "id": id,
        "alert_type": "volume_spike",
        "message": format!("alert number {id}"),
        "created_at": "2025-11-14T18:35:00",
        "resolved": false
    })
}

pub fn mention_frame(id: i64) -> Value {
    json!({ "type": "mention", "mention": mention_json(id) })
}

pub fn alert_frame(id: i64) -> Value {
    json!({ "type": "alert", "alert": alert_json(id) })
}

pub fn mention_ids(mentions: &[Mention]) -> Vec<i64> {
    mentions.iter().map(|m| m.id).collect()
}

pub fn alert_ids(alerts: &[Alert]) -> Vec<i64> {
    alerts.iter().map(|a| a.id).collect()
}
