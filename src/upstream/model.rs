//! Client for the sentiment model service.

use serde::{Deserialize, Serialize};

use crate::config::ServicesConfig;
use crate::error::{AppError, AppResult};
use crate::feedback::Sentiment;

/// Version string reported when the model version endpoint cannot be reached.
///
/// This literal ends up as the `model_version` label on the accuracy gauge,
/// so outages show up as their own labeled series instead of breaking the
/// feedback flow.
pub const MODEL_VERSION_FALLBACK: &str = "unavailable";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: i64,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

/// HTTP client for the model's prediction and version endpoints.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    predict_url: String,
    version_url: String,
}

impl ModelClient {
    /// Build a client from the configured service URLs and timeout.
    pub fn new(services: &ServicesConfig) -> AppResult<Self> {
        Ok(Self {
            http: super::http_client(services.timeout())?,
            predict_url: services.model_url().to_string(),
            version_url: services.model_version_url().to_string(),
        })
    }

    /// Ask the model service to classify one review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] for every failure mode:
    /// connection refused, timeout, non-2xx status, malformed body, or a
    /// prediction outside `{0, 1}`. Callers render a degraded page on this
    /// error rather than surfacing it as an HTTP failure.
    pub async fn predict(&self, text: &str) -> AppResult<Sentiment> {
        let response = self
            .http
            .post(&self.predict_url)
            .json(&PredictRequest { text })
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("unexpected status {}", status)));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed response: {}", e)))?;

        Sentiment::from_i64(body.prediction).ok_or_else(|| {
            unavailable(format!("prediction out of range: {}", body.prediction))
        })
    }

    /// Current model version, or [`MODEL_VERSION_FALLBACK`] when the version
    /// endpoint is unreachable or answers garbage.
    ///
    /// Never fails: errors are logged and collapsed into the fallback so the
    /// feedback flow keeps working through a version-endpoint outage.
    pub async fn model_version(&self) -> String {
        match self.fetch_version().await {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    url = %self.version_url,
                    error = %e,
                    "Model version lookup failed, using fallback"
                );
                MODEL_VERSION_FALLBACK.to_string()
            }
        }
    }

    async fn fetch_version(&self) -> AppResult<String> {
        let response = self
            .http
            .get(&self.version_url)
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("unexpected status {}", status)));
        }

        let body: VersionResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed response: {}", e)))?;

        Ok(body.version)
    }
}

fn unavailable(reason: String) -> AppError {
    AppError::UpstreamUnavailable {
        service: "model".to_string(),
        reason,
    }
}
