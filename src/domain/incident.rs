use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";
pub const DISTANCE_FIELD: &str = "distance_miles";

const MISSING_VALUE: &str = "N/A";

/// A single incident as returned by the data source. The shape is open ended: every field is kept as is and in the
/// order it was received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Incident(Map<String, Value>);

impl Incident {
    /// Coerces a coordinate field to a number.
    ///
    /// An absent field counts as `0`. Numbers and numeric strings are accepted, anything else (`null`, booleans,
    /// nested values, unparsable or non-finite strings) yields `None`.
    pub fn coordinate(&self, field: &str) -> Option<f64> {
        let value = match self.0.get(field) {
            None => Some(0.0),
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        value.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
impl Incident {
    pub fn display_field(&self, field: &str) -> String {
        display_value(self.0.get(field))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// A copy of an [`Incident`] with its distance to the reference point attached as `distance_miles`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedIncident {
    fields: Map<String, Value>,
    distance_miles: f64,
}

impl EnrichedIncident {
    pub fn new(incident: &Incident, distance_miles: f64) -> Self {
        let mut fields = incident.0.clone();
        fields.insert(DISTANCE_FIELD.to_string(), Value::from(distance_miles));

        EnrichedIncident { fields, distance_miles }
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    /// Returns the field formatted for humans: strings unquoted, `N/A` when absent or `null`.
    pub fn display_field(&self, field: &str) -> String {
        display_value(self.fields.get(field))
    }
}

#[cfg(test)]
impl EnrichedIncident {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_VALUE.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
    }
}

impl Serialize for EnrichedIncident {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}
