//! Prediction feedback intake and corrected-label forwarding

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;

use crate::error::AppResult;
use crate::feedback::Feedback;
use crate::handlers::AppState;
use crate::views;

/// Form body posted from the result page.
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub review: String,
    pub predicted_sentiment: String,
    pub feedback: String,
}

/// Accept a correctness verdict, update the accuracy metrics, and forward
/// the corrected label to the data collection service.
///
/// The order matters: validation happens before any metric moves, the
/// verdict counters and feedback histogram are recorded before the forward,
/// and a forwarding failure leaves them recorded. The model version lookup
/// cannot fail; an outage labels the accuracy gauge `"unavailable"`.
pub async fn handler(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> AppResult<Html<String>> {
    let feedback = Feedback::new(form.review, &form.predicted_sentiment, form.feedback)?;

    let metrics = state.metrics();
    metrics.record_verdict(feedback.prediction_was_incorrect());
    if let Err(e) = metrics.observe_feedback_length(
        state.app_version(),
        feedback.verdict(),
        feedback.review_chars(),
    ) {
        tracing::error!(error = %e, "Failed to record feedback review length");
    }

    let model_version = state.model().model_version().await;
    if let Err(e) = metrics.refresh_accuracy(&model_version) {
        tracing::error!(error = %e, model_version = %model_version, "Failed to refresh accuracy gauge");
    }

    state
        .collector()
        .submit(feedback.review(), feedback.corrected())
        .await?;

    tracing::info!(
        verdict = %feedback.verdict(),
        corrected = %feedback.corrected(),
        model_version = %model_version,
        "Feedback recorded and forwarded"
    );

    Ok(Html(views::thanks_page()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AppError;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_for(base: &str) -> AppState {
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
        AppState::new(Arc::new(config)).unwrap()
    }

    fn form(review: &str, predicted: &str, verdict: &str) -> Form<FeedbackForm> {
        Form(FeedbackForm {
            review: review.to_string(),
            predicted_sentiment: predicted.to_string(),
            feedback: verdict.to_string(),
        })
    }

    async fn mount_version_and_collect(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "1.0.0"})),
            )
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_incorrect_verdict_forwards_flipped_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "1.0.0"})),
            )
            .mount(&server)
            .await;
        // The model said positive (1); the user disagreed, so the sink must
        // receive negative (0).
        Mock::given(method("POST"))
            .and(path("/collect"))
            .and(body_json(
                serde_json::json!({"text": "bland soup", "sentiment": 0}),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server.uri());
        let result = handler(State(state.clone()), form("bland soup", "1", "incorrect")).await;

        assert!(result.is_ok());
        assert_eq!(state.metrics().incorrect_predictions_count(), 1);
        assert_eq!(state.metrics().correct_predictions_count(), 0);
    }

    #[tokio::test]
    async fn test_correct_verdict_forwards_label_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "1.0.0"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .and(body_json(
                serde_json::json!({"text": "lovely spot", "sentiment": 1}),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server.uri());
        let result = handler(State(state.clone()), form("lovely spot", "1", "correct")).await;

        assert!(result.is_ok());
        assert_eq!(state.metrics().correct_predictions_count(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_verdict_counts_as_correct() {
        let server = MockServer::start().await;
        mount_version_and_collect(&server).await;

        let state = state_for(&server.uri());
        let result = handler(State(state.clone()), form("fine", "0", "not sure")).await;

        assert!(result.is_ok());
        assert_eq!(state.metrics().correct_predictions_count(), 1);
        assert_eq!(state.metrics().incorrect_predictions_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_predicted_sentiment_rejected_before_metrics() {
        let server = MockServer::start().await;
        mount_version_and_collect(&server).await;

        let state = state_for(&server.uri());
        let err = handler(State(state.clone()), form("fine", "maybe", "correct"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(state.metrics().correct_predictions_count(), 0);
        assert_eq!(state.metrics().incorrect_predictions_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_predicted_sentiment_rejected() {
        let server = MockServer::start().await;
        mount_version_and_collect(&server).await;

        let state = state_for(&server.uri());
        let err = handler(State(state.clone()), form("fine", "2", "correct"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_forward_failure_keeps_metrics_recorded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "1.0.0"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = state_for(&server.uri());
        let err = handler(State(state.clone()), form("cold fries", "1", "incorrect"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ForwardFailed { .. }));
        // No rollback: the verdict stays counted and the gauge stays set.
        assert_eq!(state.metrics().incorrect_predictions_count(), 1);
        assert_eq!(state.metrics().accuracy_value("1.0.0").unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_version_outage_labels_gauge_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collect"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let state = state_for(&server.uri());
        let result = handler(State(state.clone()), form("good", "1", "correct")).await;

        assert!(result.is_ok());
        assert_eq!(state.metrics().accuracy_value("unavailable").unwrap(), 100.0);
    }
}
