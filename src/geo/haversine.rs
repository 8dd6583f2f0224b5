use crate::domain::GeoLocation;

/// Mean radius of a spherical earth.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Great-circle distance in miles between two points given in decimal degrees, using the haversine formula.
///
/// The inputs are not validated, out of range values still produce a (meaningless) finite distance.
pub fn distance_miles(latitude_1: f64, longitude_1: f64, latitude_2: f64, longitude_2: f64) -> f64 {
    let (latitude_1, longitude_1, latitude_2, longitude_2) =
        (latitude_1.to_radians(), longitude_1.to_radians(), latitude_2.to_radians(), longitude_2.to_radians());

    let delta_latitude = latitude_2 - latitude_1;
    let delta_longitude = longitude_2 - longitude_1;

    let a = (delta_latitude / 2.0).sin().powi(2) + latitude_1.cos() * latitude_2.cos() * (delta_longitude / 2.0).sin().powi(2);
    // Rounding can push `a` just outside [0, 1] for (near) antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    c * EARTH_RADIUS_MILES
}

impl GeoLocation {
    pub fn distance_to(&self, other: &GeoLocation) -> f64 {
        distance_miles(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}
