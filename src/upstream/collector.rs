//! Client for the data collection service.

use serde::Serialize;

use crate::config::ServicesConfig;
use crate::error::{AppError, AppResult};
use crate::feedback::Sentiment;

#[derive(Debug, Serialize)]
struct CollectRequest<'a> {
    text: &'a str,
    sentiment: u8,
}

/// HTTP client for the corrected-label sink.
#[derive(Debug, Clone)]
pub struct CollectorClient {
    http: reqwest::Client,
    url: String,
}

impl CollectorClient {
    /// Build a client from the configured service URL and timeout.
    pub fn new(services: &ServicesConfig) -> AppResult<Self> {
        Ok(Self {
            http: super::http_client(services.timeout())?,
            url: services.collection_url().to_string(),
        })
    }

    /// Forward one review with its corrected label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ForwardFailed`] when the service is unreachable,
    /// times out, or answers non-2xx. By the time this is called the
    /// feedback metrics are already recorded and stay recorded; there is no
    /// retry and no rollback.
    pub async fn submit(&self, text: &str, sentiment: Sentiment) -> AppResult<()> {
        let response = self
            .http
            .post(&self.url)
            .json(&CollectRequest {
                text,
                sentiment: sentiment.as_u8(),
            })
            .send()
            .await
            .map_err(|e| AppError::ForwardFailed {
                reason: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ForwardFailed {
                reason: format!("unexpected status {}", status),
            });
        }

        tracing::debug!(sentiment = %sentiment, "Forwarded corrected label");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str) -> CollectorClient {
        let toml = format!(
            r#"
            [services]
            model_url = "{base}/predict"
            model_version_url = "{base}/version"
            collection_url = "{base}/collect"
            timeout_seconds = 2
            "#
        );
        let config: Config = toml.parse().unwrap();
        CollectorClient::new(&config.services).unwrap()
    }

    #[tokio::test]
    async fn submit_sends_text_and_numeric_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .and(body_json(
                serde_json::json!({"text": "stale bread", "sentiment": 0}),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        client.submit("stale bread", Sentiment::Negative).await.unwrap();
    }

    #[tokio::test]
    async fn submit_maps_server_error_to_forward_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.submit("stale bread", Sentiment::Positive).await.unwrap_err();
        match err {
            AppError::ForwardFailed { reason } => assert!(reason.contains("500")),
            other => panic!("expected ForwardFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn submit_maps_connection_refused_to_forward_failed() {
        let client = client_for("http://127.0.0.1:1");
        let err = client.submit("stale bread", Sentiment::Positive).await.unwrap_err();
        assert!(matches!(err, AppError::ForwardFailed { .. }));
    }
}
