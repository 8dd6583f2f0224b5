use crate::domain::{EnrichedIncident, GeoLocation, Incident, LATITUDE_FIELD, LONGITUDE_FIELD};
use crate::extensions::float_ext::RoundDecimals;
use ordered_float::OrderedFloat;
use tracing::{debug, instrument};

pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 1.0;

const DISTANCE_DECIMALS: u32 = 3;

/// Keeps the incidents within `max_distance_miles` of `reference`, each enriched with its rounded distance and sorted
/// nearest first. Incidents without usable coordinates are skipped. Equal distances keep their input order.
#[instrument(skip_all, fields(incidents = incidents.len(), max_distance_miles = max_distance_miles))]
pub fn filter_incidents(incidents: &[Incident], reference: &GeoLocation, max_distance_miles: f64) -> Vec<EnrichedIncident> {
    let mut skipped = 0;

    let mut nearby = incidents
        .iter()
        .filter_map(|incident| match incident_location(incident) {
            Some(location) => Some((incident, reference.distance_to(&location).round_decimals(DISTANCE_DECIMALS))),
            None => {
                skipped += 1;
                None
            }
        })
        .filter(|(_, distance)| *distance <= max_distance_miles)
        .map(|(incident, distance)| EnrichedIncident::new(incident, distance))
        .collect::<Vec<_>>();

    // `sort_by_key` is stable
    nearby.sort_by_key(|incident| OrderedFloat(incident.distance_miles()));

    debug!(
        "{} incidents nearby, {} too far, {} skipped without valid coordinates",
        nearby.len(),
        incidents.len() - nearby.len() - skipped,
        skipped
    );
    nearby
}

fn incident_location(incident: &Incident) -> Option<GeoLocation> {
    let latitude = incident.coordinate(LATITUDE_FIELD)?;
    let longitude = incident.coordinate(LONGITUDE_FIELD)?;

    if latitude == 0.0 && longitude == 0.0 {
        return None;
    }

    Some(GeoLocation { latitude, longitude })
}
