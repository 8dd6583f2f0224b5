use crate::app_config::AppConfig;
use crate::filter::filter_incidents;
use crate::output::{PersistError, persist, report};
use crate::source::{Coordinates, IncidentSource};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub retrieved: usize,
    pub retained: usize,
    pub output_path: PathBuf,
}

/// Fetches the incidents, keeps the nearby ones, reports them and saves them to the configured output file.
#[instrument(skip_all, fields(endpoint = %coordinates.endpoint))]
pub async fn run(config: &AppConfig, coordinates: &Coordinates, source: &dyn IncidentSource) -> Result<RunSummary, PipelineError> {
    let reference = &coordinates.reference;
    info!("🎯 Target coordinates: {}, {}", reference.latitude, reference.longitude);

    let incidents = source.fetch(&coordinates.endpoint).await;
    if incidents.is_empty() {
        warn!("⚠️ No data received from the API");
    } else {
        info!("Retrieved {} total incidents", incidents.len());
    }

    let max_distance_miles = config.filter().max_distance_miles();
    let nearby = filter_incidents(&incidents, reference, max_distance_miles);
    report(&nearby, max_distance_miles);

    let output_path = config.output().path().to_path_buf();
    persist(&nearby, &output_path).await?;

    Ok(RunSummary {
        retrieved: incidents.len(),
        retained: nearby.len(),
        output_path,
    })
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Persist(#[from] PersistError),
}
