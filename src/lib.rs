//! Reviewlens - review sentiment front end with prediction feedback telemetry
//!
//! This library serves a restaurant review form, forwards submissions to an
//! external sentiment model service, collects correctness feedback on the
//! predictions, and forwards corrected labels to a data collection service.
//! Every step is instrumented with Prometheus metrics exposed at `/metrics`.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod members;
pub mod metrics;
pub mod middleware;
pub mod resources;
pub mod telemetry;
pub mod upstream;
pub mod version;
pub mod views;

use handlers::AppState;
use middleware::request_id_middleware;

/// Assemble the HTTP routes over shared application state.
///
/// One router serves both the user-facing pages and the operational
/// endpoints, so everything shares the request-id and trace layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::handler))
        .route("/predict", post(handlers::predict::handler))
        .route("/feedback", post(handlers::feedback::handler))
        .route("/metrics", get(handlers::metrics::handler))
        .route("/click/{member_name}", get(handlers::click::handler))
        .route("/health", get(handlers::health::handler))
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
