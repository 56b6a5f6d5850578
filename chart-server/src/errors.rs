use std::fmt::{self, Display};
use std::io;

use geodesy::GeodesyError;
use logger::LoggerError;
use vessel_sim::SimError;

/// Represents errors that can occur while bootstrapping or running the
/// chart server.
#[derive(Debug)]
pub enum ServerError {
    IoError(io::Error),
    RouteError(String),   // Problems reading or parsing the route file
    CoordinateError(GeodesyError),
    SimulationError(SimError),
    LoggerError(LoggerError),
    InvalidArgument(String),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::IoError(err) => write!(f, "I/O error: {}", err),
            ServerError::RouteError(msg) => write!(f, "Route file error: {}", msg),
            ServerError::CoordinateError(err) => write!(f, "Coordinate error: {}", err),
            ServerError::SimulationError(err) => write!(f, "Simulation error: {}", err),
            ServerError::LoggerError(err) => write!(f, "Logger error: {}", err),
            ServerError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        ServerError::IoError(err)
    }
}

impl From<GeodesyError> for ServerError {
    fn from(err: GeodesyError) -> Self {
        ServerError::CoordinateError(err)
    }
}

impl From<SimError> for ServerError {
    fn from(err: SimError) -> Self {
        ServerError::SimulationError(err)
    }
}

impl From<LoggerError> for ServerError {
    fn from(err: LoggerError) -> Self {
        ServerError::LoggerError(err)
    }
}

impl From<csv::Error> for ServerError {
    fn from(err: csv::Error) -> Self {
        ServerError::RouteError(err.to_string())
    }
}
