//! The event-bus socket: connection management, subscriptions, dispatch.
//!
//! This module provides the client side of the fleet socket:
//! - One persistent WebSocket connection to a fixed host and port
//! - Unconditional reconnection with doubling backoff
//! - A subscriber registry keyed by `(event, optional drone id)` that
//!   outlives every individual connection
//! - Synchronous, registration-ordered dispatch of inbound envelopes
//!
//! # Example
//!
//! ```ignore
//! use fleetlink_core::SocketEvent;
//! use fleetlink_net::socket::{EventBusSocket, SocketConfig};
//!
//! let socket = EventBusSocket::new(SocketConfig::new("localhost", 5678));
//!
//! socket.on_connection_change(|up| {
//!     println!("connection is now {}", if up { "up" } else { "down" });
//! });
//!
//! let id = socket.subscribe(SocketEvent::MissionState, |data| {
//!     println!("mission state: {data}");
//! });
//!
//! socket.connect();
//! // ... later
//! socket.unsubscribe(id);
//! socket.close();
//! ```

mod client;
mod config;
mod registry;
mod state;

pub use client::EventBusSocket;
pub use config::{BackoffConfig, SocketConfig};
pub use registry::SubscriptionId;
pub use state::ConnectionState;
