use crate::app_config::AppConfig;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

/// Builds the client used to fetch incidents. Every request is bounded by the configured timeout.
pub fn new_client(config: &AppConfig) -> Result<Client, HttpClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_str(config.fetch().user_agent())?);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder().timeout(config.fetch().timeout()).default_headers(headers).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("invalid user agent: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use std::io::Write;
    use std::time::Duration;

    #[tokio::test]
    async fn new_client_sets_the_user_agent_and_accept_headers() -> Result<(), HttpClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .match_header("user-agent", "incident-radius-test")
            .match_header("accept", "application/json")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().build();
        let client = new_client(&config)?;

        client.get(format!("{}{}", server.url(), "/")).send().await?;

        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn new_client_times_out_slow_requests() -> Result<(), HttpClientError> {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/")
            .with_chunked_body(|writer| {
                std::thread::sleep(Duration::from_millis(500));
                writer.write_all(b"[]")
            })
            .create_async()
            .await;

        let config = AppConfigBuilder::new().timeout(Duration::from_millis(50)).build();
        let client = new_client(&config)?;

        let result = client.get(server.url()).send().await.and_then(|r| r.error_for_status());
        let error = match result {
            Ok(response) => response.text().await.expect_err("expected the request to time out"),
            Err(e) => e,
        };
        assert!(error.is_timeout(), "expected a timeout, found {:?}", error);

        Ok(())
    }
}
