//! Resilient event-bus socket client for Fleetlink dashboards.
//!
//! This crate provides [`EventBusSocket`]: one long-lived WebSocket
//! connection to the fleet control server, multiplexed across logical event
//! channels keyed by `(event, optional drone id)`.
//!
//! - Automatic reconnection with doubling backoff; the subscriber registry
//!   survives any number of connection cycles
//! - Publish/subscribe that never errors toward the caller; failures are
//!   reported through `tracing` and the connection-state flag
//! - Synchronous, registration-ordered callback dispatch per inbound frame
//!
//! # Example
//!
//! ```ignore
//! use fleetlink_core::SocketEvent;
//! use fleetlink_net::{EventBusSocket, SocketConfig};
//!
//! let socket = EventBusSocket::new(SocketConfig::new("localhost", 5678));
//!
//! socket.subscribe_drone(SocketEvent::BatteryLevel, "drone-7", |data| {
//!     println!("battery: {data}");
//! });
//! socket.connect();
//!
//! socket.publish_drone(SocketEvent::SetLed, "drone-7", serde_json::json!(true));
//! ```

mod error;
pub mod socket;

pub use error::{Result, SocketError};

// Re-export commonly used types at the crate root
pub use socket::{
    BackoffConfig, ConnectionState, EventBusSocket, SocketConfig, SubscriptionId,
};
