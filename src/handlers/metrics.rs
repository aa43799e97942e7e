//! Prometheus metrics endpoint
//!
//! Exposes metrics in Prometheus text format for scraping. Each scrape also
//! refreshes the process CPU and memory gauges, so resource readings are
//! only as fresh as the last scrape.

use axum::{extract::State, http::StatusCode};

use crate::handlers::AppState;

/// Metrics handler for Prometheus scraping
///
/// Samples process resource usage, then renders the full registry.
/// A failed sample is logged by the sampler and skipped; the gauges keep
/// their previous values and the scrape still succeeds.
///
/// # Response
///
/// - `200 OK` with metrics in Prometheus text format
/// - `500 Internal Server Error` if encoding the registry fails
pub async fn handler(State(state): State<AppState>) -> (StatusCode, String) {
    if let Some(usage) = state.sampler().sample() {
        state
            .metrics()
            .set_process_usage(usage.cpu_percent, usage.memory_percent);
    }

    match state.metrics().gather() {
        Ok(output) => (StatusCode::OK, output),
        Err(e) => {
            tracing::error!(
                error = %e,
                "Failed to gather metrics for Prometheus scraping"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to gather metrics: {}", e),
            )
        }
    }
}
