//! Error types for Reviewlens
//!
//! All errors implement `IntoResponse` for Axum handlers. Since every
//! non-scrape consumer of this service is a browser form, error bodies are
//! small HTML pages rather than JSON.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid request: {0}")]
    Validation(String),

    /// The predict handler consumes this variant and renders a degraded
    /// page in its place; the 502 mapping below applies only when a caller
    /// propagates it into a response.
    #[error("{service} service unavailable: {reason}")]
    UpstreamUnavailable { service: String, reason: String },

    #[error("Failed to forward feedback to data collection service: {reason}")]
    ForwardFailed { reason: String },

    #[error("Unknown team member: {0}")]
    UnknownMember(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnknownMember(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ForwardFailed { .. }
            | Self::Metrics(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Html(views::error_page(status, &self.to_string()));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = AppError::Validation("predicted_sentiment must be 0 or 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid request: predicted_sentiment must be 0 or 1"
        );
    }

    #[test]
    fn test_forward_failed_message() {
        let err = AppError::ForwardFailed {
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to forward feedback to data collection service: connection refused"
        );
    }

    #[test]
    fn test_unknown_member_message() {
        let err = AppError::UnknownMember("nobody".to_string());
        assert_eq!(err.to_string(), "Unknown team member: nobody");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("bad".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_member_maps_to_404() {
        let err = AppError::UnknownMember("nobody".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forward_failed_maps_to_500() {
        let err = AppError::ForwardFailed {
            reason: "boom".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_unavailable_maps_to_502() {
        let err = AppError::UpstreamUnavailable {
            service: "model".to_string(),
            reason: "timed out".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_prometheus_error_converts() {
        let err: AppError = prometheus::Error::Msg("bad metric".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
