use crate::app_config::AppConfig;
use crate::pipeline::RunSummary;
use crate::source::{CoordinatesFile, HttpIncidentSource};
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info, warn};

mod app_config;
mod domain;
mod extensions;
mod filter;
mod geo;
mod output;
mod pipeline;
mod source;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    exit_code(&start().await)
}

/// Only a run that retrieved incidents succeeds; a run without data still writes its (empty) output but fails.
fn exit_code(result: &Result<RunSummary, Box<dyn Error>>) -> ExitCode {
    match result {
        Ok(summary) if summary.retrieved > 0 => {
            info!("✅ Saved {} of {} incidents to '{}'", summary.retained, summary.retrieved, summary.output_path.display());
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            warn!("⚠️ No incidents were retrieved, wrote an empty result to '{}'", summary.output_path.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<RunSummary, Box<dyn Error>> {
    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let coordinates = CoordinatesFile::new(config.coordinates().path()).read().await?;
    info!("✅  Using API {}", coordinates.endpoint);

    let source = HttpIncidentSource::new(source::new_client(&config)?);
    let summary = pipeline::run(&config, &coordinates, &source).await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn summary(retrieved: usize, retained: usize) -> Result<RunSummary, Box<dyn Error>> {
        Ok(RunSummary {
            retrieved,
            retained,
            output_path: PathBuf::from("filtered_incidents.json"),
        })
    }

    #[rstest]
    #[case(summary(8, 3), ExitCode::SUCCESS)]
    #[case(summary(8, 0), ExitCode::SUCCESS)]
    #[case(summary(0, 0), ExitCode::FAILURE)]
    #[case(Err("missing 'API Access'".into()), ExitCode::FAILURE)]
    fn exit_code_fails_without_retrieved_incidents(#[case] result: Result<RunSummary, Box<dyn Error>>, #[case] expected: ExitCode) {
        assert_eq!(exit_code(&result), expected);
    }
}
