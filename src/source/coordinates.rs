use crate::domain::{GeoLocation, GeoLocationError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

const ENDPOINT_KEY: &str = "API Access";
const LATITUDE_KEY: &str = "My latitude";
const LONGITUDE_KEY: &str = "My longitude";

/// Where to fetch incidents from and the point to measure their distance to.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinates {
    pub endpoint: String,
    pub reference: GeoLocation,
}

/// A text file with `key: value` lines holding the endpoint and the reference point:
///
/// ```text
/// API Access: https://data.seattle.gov/resource/kzjm-xkqj.json
/// My latitude: 47.6062
/// My longitude: -122.3321
/// ```
#[derive(Debug)]
pub struct CoordinatesFile {
    path: PathBuf,
}

impl CoordinatesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CoordinatesFile { path: path.into() }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read(&self) -> Result<Coordinates, CoordinatesError> {
        info!("📁 Reading coordinates...");
        let content = fs::read_to_string(&self.path).await.map_err(|source| CoordinatesError::Io {
            source,
            path: self.path.clone(),
        })?;

        let coordinates = parse(&content)?;
        info!("📁 Reading coordinates... OK");
        Ok(coordinates)
    }
}

/// Parses the coordinates file content. Unknown lines are ignored and a repeated key overrides the earlier value.
pub fn parse(content: &str) -> Result<Coordinates, CoordinatesError> {
    let mut endpoint = None;
    let mut latitude = None;
    let mut longitude = None;

    for (key, value) in content.lines().filter_map(|line| line.split_once(':')) {
        let value = value.trim();
        match key.trim() {
            ENDPOINT_KEY => endpoint = Some(value).filter(|v| !v.is_empty()),
            LATITUDE_KEY => latitude = Some(parse_number(LATITUDE_KEY, value)?),
            LONGITUDE_KEY => longitude = Some(parse_number(LONGITUDE_KEY, value)?),
            _ => {}
        }
    }

    let endpoint = endpoint.ok_or(CoordinatesError::MissingField(ENDPOINT_KEY))?;
    let latitude = latitude.ok_or(CoordinatesError::MissingField(LATITUDE_KEY))?;
    let longitude = longitude.ok_or(CoordinatesError::MissingField(LONGITUDE_KEY))?;

    Ok(Coordinates {
        endpoint: endpoint.to_string(),
        reference: GeoLocation::new(latitude, longitude)?,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, CoordinatesError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| CoordinatesError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[derive(Error, Debug)]
pub enum CoordinatesError {
    #[error("unable to read '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("missing '{0}'")]
    MissingField(&'static str),
    #[error("'{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error(transparent)]
    InvalidLocation(#[from] GeoLocationError),
}
