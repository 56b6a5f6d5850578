use std::path::Path;

use serde::Deserialize;

use geodesy::{parse_dms, GeoPoint};
use vessel_sim::Waypoint;

use crate::errors::ServerError;

/// One row of a route CSV file. Coordinates are DMS strings so route files
/// can be copied straight off a paper chart.
#[derive(Debug, Deserialize)]
struct RouteRecord {
    lat: String,
    lon: String,
    speed_knots: f64,
}

/// Loads a patrol route from a CSV file with `lat,lon,speed_knots` columns,
/// e.g. `55 40 34N,12 34 06E,6.0`.
pub fn load_route(path: &Path) -> Result<Vec<Waypoint>, ServerError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| ServerError::RouteError(format!("{}: {}", path.display(), err)))?;

    let mut route = Vec::new();
    for record in reader.deserialize() {
        let record: RouteRecord = record?;
        let lat = parse_dms(&record.lat)?;
        let lon = parse_dms(&record.lon)?;
        route.push(Waypoint::new(GeoPoint::new(lat, lon), record.speed_knots));
    }

    Ok(route)
}
