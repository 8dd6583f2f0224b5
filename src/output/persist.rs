use crate::domain::EnrichedIncident;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Writes the incidents as a pretty printed JSON array, replacing the file when it exists.
#[instrument(skip(incidents), fields(count = incidents.len()))]
pub async fn persist(incidents: &[EnrichedIncident], path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(incidents)?;
    fs::write(path, json).await.map_err(|source| PersistError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    info!("📁 Saved {} incidents to '{}'", incidents.len(), path.display());
    Ok(())
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("unable to serialize incidents: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unable to write '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Incident;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::env::temp_dir;

    #[tokio::test]
    async fn persist_writes_pretty_printed_json() -> Result<(), PersistError> {
        let path = temp_dir().join("incident_radius_persist.json");
        let incident: Incident = serde_json::from_value(json!({"type": "Aid Response", "latitude": "47.6062"})).unwrap();

        persist(&[EnrichedIncident::new(&incident, 0.25)], &path).await?;

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            r#"[
  {
    "type": "Aid Response",
    "latitude": "47.6062",
    "distance_miles": 0.25
  }
]"#
        );
        Ok(())
    }

    #[tokio::test]
    async fn persist_writes_an_empty_array_for_no_incidents() -> Result<(), PersistError> {
        let path = temp_dir().join("incident_radius_persist_empty.json");

        persist(&[], &path).await?;

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "[]");
        Ok(())
    }

    #[tokio::test]
    async fn persist_fails_when_the_directory_does_not_exist() {
        let path = temp_dir().join("incident_radius_no_such_dir").join("out.json");

        let result = persist(&[], &path).await;

        assert!(matches!(result, Err(PersistError::Io { path: p, .. }) if p == path));
    }
}
