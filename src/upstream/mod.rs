//! HTTP clients for the services behind this front end.
//!
//! Two collaborators sit upstream: the sentiment model service (prediction
//! and version endpoints) and the data collection service that archives
//! corrected labels. Every call goes through a `reqwest` client built with
//! the configured timeout, so a hung upstream can stall a handler for at
//! most that long. Calls are never retried.

mod collector;
mod model;

pub use collector::CollectorClient;
pub use model::{MODEL_VERSION_FALLBACK, ModelClient};

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Build an HTTP client with an explicit per-request timeout.
fn http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}
