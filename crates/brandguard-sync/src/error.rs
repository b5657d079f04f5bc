use thiserror::Error;

/// Errors produced by the synchronization building blocks.
///
/// A running [`Session`](crate::Session) never returns these; they are logged
/// at the component boundary and the affected state is left untouched.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured base URL cannot be used to build endpoint URLs.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure on the push connection.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A push frame was not valid JSON.
    #[error("unparseable push frame: {0}")]
    FrameParse(#[source] serde_json::Error),
}
