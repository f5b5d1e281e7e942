//! Error types for the socket client.
//!
//! These errors never cross the publish/subscribe boundary; they circulate
//! inside the transport task, where they are logged and fed into the
//! reconnect path.

/// A specialized Result type for socket operations.
pub type Result<T> = std::result::Result<T, SocketError>;

/// Errors raised inside the socket client.
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// The WebSocket handshake or an established connection failed.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// An inbound frame was not a valid envelope.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for SocketError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(err.to_string())
    }
}
