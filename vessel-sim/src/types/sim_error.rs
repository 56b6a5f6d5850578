use std::fmt;

/// Represents errors that can occur in the vessel simulator.
#[derive(Debug)]
pub enum SimError {
    RouteTooShort(usize),       // A patrol route needs at least two waypoints
    StateLockError(String),     // Vessel state lock was poisoned
    TimerLockError(String),     // Lock errors inside the Timer
    TimerStartError(String),    // Errors spawning the timer thread
    InvalidInterval(String),    // An out-of-range tick interval was requested
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::RouteTooShort(len) => write!(
                f,
                "Invalid route: got {} waypoint(s), need at least 2 to define a direction of travel",
                len
            ),
            SimError::StateLockError(msg) => write!(f, "State lock error: {}", msg),
            SimError::TimerLockError(msg) => write!(f, "Timer lock error: {}", msg),
            SimError::TimerStartError(msg) => write!(f, "Timer start error: {}", msg),
            SimError::InvalidInterval(msg) => write!(f, "Invalid tick interval: {}", msg),
        }
    }
}
