use geodesy::GeoPoint;

/// Direction of travel through the waypoint sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Index step applied when advancing to the next waypoint.
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Converts the `Direction` variant to its string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// The mutable navigation state of the simulated vessel.
///
/// A single instance lives for the whole process and is mutated exclusively
/// by the simulator's tick; the reversal rule keeps
/// `active_waypoint + direction` a valid index into the route at all times.
#[derive(Debug, Clone, Copy)]
pub struct VesselState {
    pub position: GeoPoint,
    /// Degrees, kept in [0, 360) after each tick.
    pub course_over_ground: f64,
    /// Mirrors course over ground; no drift or leeway is modeled.
    pub heading: f64,
    /// Meters per second.
    pub speed_mps: f64,
    pub active_waypoint: usize,
    pub direction: Direction,
}

impl VesselState {
    /// Index of the waypoint the vessel is currently steering toward.
    pub fn target_index(&self) -> usize {
        (self.active_waypoint as isize + self.direction.step()) as usize
    }
}
