use crate::filter::DEFAULT_MAX_DISTANCE_MILES;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const ENVIRONMENT_PREFIX: &str = "INCIDENT_RADIUS";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    coordinates: CoordinatesConfig,
    fetch: Fetch,
    #[serde(default)]
    filter: Filter,
    output: Output,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppConfigError> {
        Self::load_from("config")
    }

    /// Loads `{name}.toml`, overridden by an optional `{name}_local.toml` and by `INCIDENT_RADIUS__SECTION__KEY`
    /// environment variables.
    pub fn load_from(name: &str) -> Result<Self, AppConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::with_name(name).required(true))
            .add_source(config::File::with_name(&format!("{}_local", name)).required(false))
            .add_source(config::Environment::with_prefix(ENVIRONMENT_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()
    }

    fn validate(self) -> Result<Self, AppConfigError> {
        let max_distance_miles = self.filter.max_distance_miles;
        if !(max_distance_miles.is_finite() && max_distance_miles >= 0.0) {
            return Err(AppConfigError::InvalidThreshold(max_distance_miles));
        }

        Ok(self)
    }

    pub fn coordinates(&self) -> &CoordinatesConfig {
        &self.coordinates
    }

    pub fn fetch(&self) -> &Fetch {
        &self.fetch
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn output(&self) -> &Output {
        &self.output
    }
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesConfig {
    path: String,
}

impl CoordinatesConfig {
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }
}

#[derive(Debug, Deserialize)]
pub struct Fetch {
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    user_agent: String,
}

impl Fetch {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, Deserialize)]
pub struct Filter {
    #[serde(default = "default_max_distance_miles")]
    max_distance_miles: f64,
}

fn default_max_distance_miles() -> f64 {
    DEFAULT_MAX_DISTANCE_MILES
}

impl Default for Filter {
    fn default() -> Self {
        Filter {
            max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
        }
    }
}

impl Filter {
    pub fn max_distance_miles(&self) -> f64 {
        self.max_distance_miles
    }
}

#[derive(Debug, Deserialize)]
pub struct Output {
    path: String,
}

impl Output {
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid filter.max_distance_miles: {0}, must be a non-negative number")]
    InvalidThreshold(f64),
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                coordinates: CoordinatesConfig {
                    path: "data.txt".to_string(),
                },
                fetch: Fetch {
                    timeout: Duration::from_secs(30),
                    user_agent: "incident-radius-test".to_string(),
                },
                filter: Filter {
                    max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
                },
                output: Output {
                    path: "filtered_incidents.json".to_string(),
                },
            },
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch.timeout = timeout;
        self
    }

    pub fn max_distance_miles(mut self, max_distance_miles: f64) -> Self {
        self.config.filter.max_distance_miles = max_distance_miles;
        self
    }

    pub fn output_path(mut self, path: &Path) -> Self {
        self.config.output.path = path.to_string_lossy().into_owned();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
