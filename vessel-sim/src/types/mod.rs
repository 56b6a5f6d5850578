/// Default wall-clock period between simulation ticks, in milliseconds.
pub const TICK_FREQUENCY_MILLIS: u64 = 500;

/// Conversion factor from knots to meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

pub mod waypoint;

pub mod vessel;

pub mod update;

pub mod sim_error;

pub mod timer;

pub mod simulation;
