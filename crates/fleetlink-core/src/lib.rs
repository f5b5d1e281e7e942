//! Protocol model for Fleetlink.
//!
//! This crate defines the vocabulary shared by the ground-station dashboard
//! and the fleet control server:
//!
//! - [`SocketEvent`] - the closed enumeration of event channels
//! - [`Envelope`] - the JSON frame exchanged in both directions
//! - [`DroneStatus`] / [`MissionState`] - fleet state enumerations
//! - Telemetry payload types ([`DronePosition`], [`DroneSensorLines`], ...)
//! - [`local_timestamp`] - the wall-clock stamp carried by outbound frames
//!
//! The types here are transport-agnostic; the socket client lives in
//! `fleetlink-net` and consumes this crate for its wire format.
//!
//! # Example
//!
//! ```
//! use fleetlink_core::{Envelope, SocketEvent};
//!
//! let envelope = Envelope::new(
//!     SocketEvent::BatteryLevel,
//!     Some("drone-7".to_string()),
//!     serde_json::json!({ "level": 42 }),
//! );
//! assert_eq!(envelope.event, "battery-level");
//! assert_eq!(envelope.kind(), Some(SocketEvent::BatteryLevel));
//! ```

mod drone;
mod envelope;
mod event;
mod mission;
mod telemetry;
mod timestamp;

pub use drone::DroneStatus;
pub use envelope::Envelope;
pub use event::SocketEvent;
pub use mission::{InvalidMissionState, MissionState};
pub use telemetry::{DronePosition, DroneSensorLines, Line, Point};
pub use timestamp::local_timestamp;
