//! Mission lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of the fleet-wide mission, carried on the `mission-state` channel.
///
/// The wire representation is the bare integer the server uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MissionState {
    /// No mission in progress.
    Standby = 0,
    /// Drones are exploring.
    Exploring = 1,
    /// Drones are returning to base.
    Returning = 2,
    /// Drones are landing.
    Landing = 3,
}

/// Error for integer values outside the [`MissionState`] range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mission state value: {0}")]
pub struct InvalidMissionState(pub u8);

impl TryFrom<u8> for MissionState {
    type Error = InvalidMissionState;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Standby),
            1 => Ok(Self::Exploring),
            2 => Ok(Self::Returning),
            3 => Ok(Self::Landing),
            other => Err(InvalidMissionState(other)),
        }
    }
}

impl From<MissionState> for u8 {
    fn from(state: MissionState) -> Self {
        state as u8
    }
}

impl fmt::Display for MissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standby => "Standby",
            Self::Exploring => "Exploring",
            Self::Returning => "Returning",
            Self::Landing => "Landing",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversion_round_trips() {
        for value in 0..=3u8 {
            let state = MissionState::try_from(value).unwrap();
            assert_eq!(u8::from(state), value);
        }
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        assert_eq!(MissionState::try_from(4), Err(InvalidMissionState(4)));
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&MissionState::Returning).unwrap(), "2");

        let state: MissionState = serde_json::from_str("1").unwrap();
        assert_eq!(state, MissionState::Exploring);

        assert!(serde_json::from_str::<MissionState>("9").is_err());
    }
}
