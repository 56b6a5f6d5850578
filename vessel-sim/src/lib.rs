pub mod types;

pub use types::sim_error::SimError;
pub use types::simulation::{SimConfig, Simulator};
pub use types::timer::Timer;
pub use types::update::{NavSink, NavigationUpdate};
pub use types::vessel::{Direction, VesselState};
pub use types::waypoint::Waypoint;
