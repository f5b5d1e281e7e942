//! The JSON frame exchanged with the control server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::SocketEvent;
use crate::timestamp::local_timestamp;

/// One message on the fleet socket, in either direction.
///
/// The `event` field is kept as a raw string so that frames carrying an
/// unrecognized event name still parse; callers resolve it with
/// [`Envelope::kind`]. A `droneId` of `null` on the wire means the event is
/// fleet-wide, and maps to `None` here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Wire name of the event channel.
    pub event: String,
    /// Target drone, or `None` for fleet-wide events. Serialized as an
    /// explicit `null` when absent, matching the server's frame shape.
    #[serde(default)]
    pub drone_id: Option<String>,
    /// Event-specific payload; opaque to this layer.
    pub data: Value,
    /// Local wall-clock time at send, without a UTC-offset suffix.
    pub timestamp: String,
}

impl Envelope {
    /// Build an outbound envelope, stamping it with the current local time.
    pub fn new(event: SocketEvent, drone_id: Option<String>, data: Value) -> Self {
        Self {
            event: event.as_str().to_string(),
            drone_id,
            data,
            timestamp: local_timestamp(),
        }
    }

    /// Resolve the event string against the known enumeration.
    pub fn kind(&self) -> Option<SocketEvent> {
        SocketEvent::from_wire(&self.event)
    }

    /// Parse a single text frame.
    pub fn from_json(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }

    /// Serialize into a single text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
