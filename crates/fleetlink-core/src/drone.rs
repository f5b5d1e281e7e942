//! Drone flight status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flight status reported on the `drone-status` channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneStatus {
    /// Grounded and idle.
    Standby,
    /// Taking off.
    Liftoff,
    /// Exploring.
    Flying,
    /// Descending for a planned landing.
    Landing,
    /// On the ground after a completed flight.
    Landed,
    /// Flight ended abnormally.
    Crashed,
    /// Battery exhausted below the liftoff threshold.
    Drained,
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standby => "Standby",
            Self::Liftoff => "Liftoff",
            Self::Flying => "Flying",
            Self::Landing => "Landing",
            Self::Landed => "Landed",
            Self::Crashed => "Crashed",
            Self::Drained => "Drained",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_capitalized_string() {
        let json = serde_json::to_string(&DroneStatus::Liftoff).unwrap();
        assert_eq!(json, "\"Liftoff\"");

        let status: DroneStatus = serde_json::from_str("\"Crashed\"").unwrap();
        assert_eq!(status, DroneStatus::Crashed);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(serde_json::from_str::<DroneStatus>("\"Hovering\"").is_err());
    }
}
