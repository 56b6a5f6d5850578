pub mod errors;

pub mod route;

pub mod server;

pub use errors::ServerError;
pub use route::load_route;
pub use server::BroadcastServer;

/// Default HTTP port, matching the original chart plotter server.
pub const DEFAULT_PORT: u16 = 8080;
