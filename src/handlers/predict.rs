//! Review submission and sentiment prediction

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;

use crate::handlers::AppState;
use crate::views;

/// Form body posted from the index page.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub review: String,
}

/// Accept a review, ask the model for a sentiment, render the result.
///
/// The submission counter and length histogram are recorded before the model
/// call, so every submission counts even when the model is down. Metric
/// failures are logged and never block the user; an unreachable model
/// degrades to a page without a prediction instead of an error status.
pub async fn handler(
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> Html<String> {
    let metrics = state.metrics();
    let app_version = state.app_version();

    if let Err(e) = metrics.record_submission(app_version) {
        tracing::error!(error = %e, "Failed to record review submission");
    }
    let length_chars = form.review.chars().count() as f64;
    if let Err(e) = metrics.observe_review_length(app_version, length_chars) {
        tracing::error!(error = %e, "Failed to record review length");
    }

    let prediction = match state.model().predict(&form.review).await {
        Ok(sentiment) => {
            tracing::debug!(sentiment = %sentiment, "Model returned prediction");
            Some(sentiment)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Model unavailable, rendering degraded result");
            None
        }
    };

    Html(views::result_page(&form.review, prediction))
}
