//! Fleetlink - the socket layer of a drone-fleet ground-station dashboard.
//!
//! This is the main umbrella crate that re-exports all public APIs.
//!
//! # Example
//!
//! ```no_run
//! use fleetlink::{SocketEvent, net::EventBusSocket, net::SocketConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let socket = EventBusSocket::new(SocketConfig::new("localhost", 5678));
//!
//!     socket.subscribe(SocketEvent::MissionState, |data| {
//!         println!("mission state: {data}");
//!     });
//!
//!     socket.connect();
//!     // ... drive the dashboard here
//! }
//! ```

pub use fleetlink_core::*;

/// Event-bus socket client module.
pub mod net {
    pub use fleetlink_net::*;
}
