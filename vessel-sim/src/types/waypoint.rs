use geodesy::GeoPoint;

/// A route control point: a fixed position and the speed the vessel should
/// hold after passing it.
///
/// Waypoints are defined once at simulator construction and never mutated;
/// the route is shared read-only with the tick loop.
#[derive(Debug, Clone, Copy)]
pub struct Waypoint {
    pub position: GeoPoint,
    pub target_speed_knots: f64,
}

impl Waypoint {
    pub fn new(position: GeoPoint, target_speed_knots: f64) -> Self {
        Waypoint {
            position,
            target_speed_knots,
        }
    }
}
