//! Configuration for the event-bus socket.

use std::time::Duration;

/// Reconnection backoff bounds.
///
/// The delay starts at `base`, doubles after every unexpected closure, is
/// capped at `max`, and resets to `base` whenever a connection opens.
/// Reconnection itself is unconditional; there is no attempt limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Delay before the first reconnect attempt after a closure.
    pub base: Duration,
    /// Ceiling for the doubled delay.
    pub max: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(2),
            max: Duration::from_secs(8),
        }
    }
}

impl BackoffConfig {
    /// Create a backoff configuration with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial reconnect delay.
    pub fn base(mut self, delay: Duration) -> Self {
        self.base = delay;
        self
    }

    /// Set the maximum reconnect delay.
    pub fn max(mut self, delay: Duration) -> Self {
        self.max = delay;
        self
    }
}

/// Configuration for the connection to the control server.
#[derive(Clone, Debug)]
pub struct SocketConfig {
    /// The host the control server runs on.
    pub host: String,
    /// The port the control server listens on.
    pub port: u16,
    /// Reconnection backoff bounds.
    pub backoff: BackoffConfig,
}

impl SocketConfig {
    /// Create a configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            backoff: BackoffConfig::default(),
        }
    }

    /// Set custom backoff bounds.
    pub fn backoff_config(mut self, config: BackoffConfig) -> Self {
        self.backoff = config;
        self
    }

    /// Get the WebSocket URL (ws://host:port).
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}
