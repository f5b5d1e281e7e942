//! Telemetry payload types for position and sensor channels.

use serde::{Deserialize, Serialize};

/// A point in the map's coordinate space, in meters.
pub type Point = [f32; 3];

/// A line segment between two map points.
pub type Line = [Point; 2];

/// Payload of the `drone-position` channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DronePosition {
    pub drone_id: String,
    pub position: Point,
}

/// Payload of the `drone-sensor-lines` channel: one ray per range sensor,
/// from the drone to the detected obstacle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneSensorLines {
    pub drone_id: String,
    pub sensor_lines: Vec<Line>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uses_camel_case_fields() {
        let position = DronePosition {
            drone_id: "drone-3".to_string(),
            position: [1.0, 2.5, 0.25],
        };

        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, r#"{"droneId":"drone-3","position":[1.0,2.5,0.25]}"#);
    }

    #[test]
    fn sensor_lines_round_trip() {
        let lines = DroneSensorLines {
            drone_id: "drone-1".to_string(),
            sensor_lines: vec![[[0.0, 0.0, 0.5], [2.0, 0.0, 0.5]]],
        };

        let json = serde_json::to_string(&lines).unwrap();
        let decoded: DroneSensorLines = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, lines);
    }
}
