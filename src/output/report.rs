use crate::domain::{EnrichedIncident, LATITUDE_FIELD, LONGITUDE_FIELD};

const SEPARATOR_WIDTH: usize = 80;

/// Prints the human readable report of the nearby incidents to stdout.
pub fn report(incidents: &[EnrichedIncident], max_distance_miles: f64) {
    println!();
    print!("{}", render_report(incidents, max_distance_miles));
}

pub fn render_report(incidents: &[EnrichedIncident], max_distance_miles: f64) -> String {
    let radius = describe_radius(max_distance_miles);
    if incidents.is_empty() {
        return format!("No incidents found within {} of the specified coordinates.\n", radius);
    }

    let mut lines = vec![format!("Found {} incidents within {}:", incidents.len(), radius), "=".repeat(SEPARATOR_WIDTH)];

    for (index, incident) in incidents.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. Incident #{}", index + 1, incident.display_field("incident_number")));
        lines.push(format!("   Type: {}", incident.display_field("type")));
        lines.push(format!("   Address: {}", incident.display_field("address")));
        lines.push(format!("   Date/Time: {}", incident.display_field("datetime")));
        lines.push(format!("   Distance: {:.3} miles", incident.distance_miles()));
        lines.push(format!(
            "   Coordinates: {}, {}",
            incident.display_field(LATITUDE_FIELD),
            incident.display_field(LONGITUDE_FIELD)
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn describe_radius(miles: f64) -> String {
    if miles == 1.0 { "1 mile".to_string() } else { format!("{} miles", miles) }
}
