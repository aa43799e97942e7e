//! Health check endpoint
//!
//! Provides a simple liveness check for monitoring and load balancers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Release label applied to versioned metrics
    pub version: String,
}

/// Health check handler
///
/// Answers 200 OK whenever the process is serving requests. Upstream
/// availability is deliberately not probed here; the predict and feedback
/// flows degrade on their own terms.
pub async fn handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK",
            version: state.app_version().to_string(),
        }),
    )
}
