use std::f64::consts::PI;

pub mod dms;
pub mod errors;

pub use dms::{parse_dms, to_lat_string, to_lon_string};
pub use errors::GeodesyError;

/// Mean Earth radius in meters. All math in this crate uses a spherical
/// approximation, which is adequate for coastal-scale routes.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
///
/// `GeoPoint` is an immutable value type: the projection and measurement
/// methods always produce new points rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Returns the great-circle distance to `other` in meters, computed
    /// with the haversine formula.
    ///
    /// Symmetric: `a.distance_to(&b) == b.distance_to(&a)`. Coincident
    /// points yield `0.0`.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Returns the initial bearing from this point toward `other`, in
    /// degrees within `[0, 360)`.
    ///
    /// The bearing between coincident points is undefined; this method
    /// returns `0.0` in that case rather than failing.
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        let bearing = y.atan2(x).to_degrees();

        (bearing + 360.0) % 360.0
    }

    /// Projects the point that lies `distance_m` meters from this point
    /// along the given initial bearing, using the direct spherical
    /// solution.
    ///
    /// Bearings outside `[0, 360)` are accepted and normalized. A zero
    /// distance returns the origin unchanged. The resulting longitude is
    /// normalized into `[-180, 180]`.
    pub fn destination_point(&self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        if distance_m == 0.0 {
            return *self;
        }

        let angular = distance_m / EARTH_RADIUS_M;
        let theta = (bearing_deg.rem_euclid(360.0)) * PI / 180.0;
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        GeoPoint {
            lat: lat2.to_degrees(),
            lon: (lon2.to_degrees() + 540.0) % 360.0 - 180.0,
        }
    }
}
