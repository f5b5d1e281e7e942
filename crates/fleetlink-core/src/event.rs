//! The closed enumeration of socket event channels.

use std::fmt;

/// An event channel carried over the fleet socket.
///
/// Each variant maps to a kebab-case wire name. Inbound frames whose event
/// string is not in this enumeration are tolerated by the socket layer
/// (logged and dropped), so [`SocketEvent::from_wire`] returns an `Option`
/// rather than failing hard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocketEvent {
    /// Mission lifecycle changes (see `MissionState`).
    MissionState,
    /// The set of drone identifiers known to the server.
    DroneIds,
    /// Whether every drone has enough charge to launch.
    AreAllDronesCharged,
    /// Newly explored map points.
    MapPoints,
    /// Request to discard the accumulated map.
    ClearMap,
    /// Position update for a single drone.
    DronePosition,
    /// Range-sensor ray updates for a single drone.
    DroneSensorLines,
    /// Battery charge update for a single drone.
    BatteryLevel,
    /// Velocity update for a single drone.
    Velocity,
    /// Flight status update for a single drone (see `DroneStatus`).
    DroneStatus,
    /// Command toggling a drone's LED.
    SetLed,
    /// A log line forwarded for display.
    Log,
}

impl SocketEvent {
    /// The kebab-case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissionState => "mission-state",
            Self::DroneIds => "drone-ids",
            Self::AreAllDronesCharged => "are-all-drones-charged",
            Self::MapPoints => "map-points",
            Self::ClearMap => "clear-map",
            Self::DronePosition => "drone-position",
            Self::DroneSensorLines => "drone-sensor-lines",
            Self::BatteryLevel => "battery-level",
            Self::Velocity => "velocity",
            Self::DroneStatus => "drone-status",
            Self::SetLed => "set-led",
            Self::Log => "log",
        }
    }

    /// Parse a wire name. Returns `None` for names outside the enumeration.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "mission-state" => Some(Self::MissionState),
            "drone-ids" => Some(Self::DroneIds),
            "are-all-drones-charged" => Some(Self::AreAllDronesCharged),
            "map-points" => Some(Self::MapPoints),
            "clear-map" => Some(Self::ClearMap),
            "drone-position" => Some(Self::DronePosition),
            "drone-sensor-lines" => Some(Self::DroneSensorLines),
            "battery-level" => Some(Self::BatteryLevel),
            "velocity" => Some(Self::Velocity),
            "drone-status" => Some(Self::DroneStatus),
            "set-led" => Some(Self::SetLed),
            "log" => Some(Self::Log),
            _ => None,
        }
    }
}

impl fmt::Display for SocketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SocketEvent; 12] = [
        SocketEvent::MissionState,
        SocketEvent::DroneIds,
        SocketEvent::AreAllDronesCharged,
        SocketEvent::MapPoints,
        SocketEvent::ClearMap,
        SocketEvent::DronePosition,
        SocketEvent::DroneSensorLines,
        SocketEvent::BatteryLevel,
        SocketEvent::Velocity,
        SocketEvent::DroneStatus,
        SocketEvent::SetLed,
        SocketEvent::Log,
    ];

    #[test]
    fn wire_names_round_trip() {
        for event in ALL {
            assert_eq!(SocketEvent::from_wire(event.as_str()), Some(event));
        }
    }

    #[test]
    fn unknown_wire_name_is_none() {
        assert_eq!(SocketEvent::from_wire("warp-drive"), None);
        assert_eq!(SocketEvent::from_wire(""), None);
        // Wire names are case-sensitive
        assert_eq!(SocketEvent::from_wire("Battery-Level"), None);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(SocketEvent::BatteryLevel.to_string(), "battery-level");
        assert_eq!(SocketEvent::SetLed.to_string(), "set-led");
    }
}
