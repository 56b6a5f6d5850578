use serde::Serialize;

use super::vessel::VesselState;

/// The navigation message pushed to subscribers after every tick.
///
/// Field names match the wire format the chart clients expect:
/// `position` is `[lon, lat]`, course and heading are upper-cased
/// abbreviations, speed is in meters per second.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationUpdate {
    pub position: [f64; 2],
    #[serde(rename = "COG")]
    pub cog: f64,
    #[serde(rename = "HDG")]
    pub hdg: f64,
    pub speed: f64,
}

impl From<&VesselState> for NavigationUpdate {
    fn from(state: &VesselState) -> Self {
        NavigationUpdate {
            position: [state.position.lon, state.position.lat],
            cog: state.course_over_ground,
            hdg: state.heading,
            speed: state.speed_mps,
        }
    }
}

/// Outbound channel for navigation updates.
///
/// Delivery is fire-and-forget: a sink must not block the tick and must not
/// surface delivery failures back to the simulator.
pub trait NavSink: Send + Sync {
    fn publish(&self, update: &NavigationUpdate);
}
