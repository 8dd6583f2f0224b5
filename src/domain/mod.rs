mod geo_location;
mod incident;

pub use geo_location::{GeoLocation, GeoLocationError};
#[cfg(test)]
pub use incident::DISTANCE_FIELD;
pub use incident::{EnrichedIncident, Incident, LATITUDE_FIELD, LONGITUDE_FIELD};
