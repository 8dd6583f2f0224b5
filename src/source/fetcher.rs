use crate::domain::Incident;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Supplies the raw incidents. A source never fails: anything that goes wrong results in no incidents.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Vec<Incident>;
}

/// Fetches a JSON array of incident objects with a single GET request.
#[derive(Debug)]
pub struct HttpIncidentSource {
    client: Client,
}

impl HttpIncidentSource {
    pub fn new(client: Client) -> Self {
        HttpIncidentSource { client }
    }

    async fn try_fetch(&self, endpoint: &str) -> Result<Vec<Incident>, FetchError> {
        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<Vec<Incident>>().await.map_err(FetchError::Decode)
    }
}

#[async_trait]
impl IncidentSource for HttpIncidentSource {
    #[instrument(skip(self))]
    async fn fetch(&self, endpoint: &str) -> Vec<Incident> {
        info!("Fetching incidents...");
        match self.try_fetch(endpoint).await {
            Ok(incidents) => {
                info!("Fetching incidents... OK, {} found", incidents.len());
                incidents
            }
            Err(e) => {
                warn!("⚠️ Error fetching data: {}", e);
                Vec::new()
            }
        }
    }
}

#[derive(Error, Debug)]
enum FetchError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("invalid response body: {0}")]
    Decode(reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use test_log::test;

    #[test(tokio::test)]
    async fn fetch_returns_every_incident() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/resource/kzjm-xkqj.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/incidents.json"))
            .create_async()
            .await;

        let source = HttpIncidentSource::new(Client::new());
        let incidents = source.fetch(&format!("{}/resource/kzjm-xkqj.json", server.url())).await;

        mock.assert_async().await;
        assert_eq!(incidents.len(), 8);
        assert_eq!(incidents[0].display_field("incident_number"), "F250061001");
        assert_eq!(incidents[7].coordinate("latitude"), Some(47.6127));
    }

    #[test(tokio::test)]
    async fn fetch_returns_nothing_for_an_empty_array() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(200).with_body("[]").create_async().await;

        let incidents = HttpIncidentSource::new(Client::new()).fetch(&server.url()).await;

        assert_eq!(incidents, vec![]);
    }

    #[rstest]
    #[case(500, "[]")]
    #[case(404, "not found")]
    #[case(200, "<html>maintenance</html>")]
    #[case(200, r#"{"error": "rate limited"}"#)]
    #[case(200, r#"[{"latitude": "47.6"}, 42]"#)]
    #[tokio::test]
    async fn fetch_returns_nothing_on_failure(#[case] status: usize, #[case] body: &str) {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/").with_status(status).with_body(body).create_async().await;

        let incidents = HttpIncidentSource::new(Client::new()).fetch(&server.url()).await;

        mock.assert_async().await;
        assert_eq!(incidents, vec![]);
    }

    #[test(tokio::test)]
    async fn fetch_returns_nothing_when_the_host_is_unreachable() {
        let incidents = HttpIncidentSource::new(Client::new()).fetch("http://127.0.0.1:1/incidents").await;

        assert_eq!(incidents, vec![]);
    }

    #[test(tokio::test)]
    async fn fetch_returns_nothing_for_an_invalid_endpoint() {
        let incidents = HttpIncidentSource::new(Client::new()).fetch("not a url").await;

        assert_eq!(incidents, vec![]);
    }
}
