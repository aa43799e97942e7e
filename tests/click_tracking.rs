//! Integration tests for team-member profile click tracking.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use reviewlens::config::Config;
use reviewlens::handlers::AppState;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> (Router, AppState) {
    let toml = r#"
        [services]
        model_url = "http://localhost:5001/predict"
        model_version_url = "http://localhost:5001/version"
        collection_url = "http://localhost:5002/collect"
    "#;
    let config: Config = toml.parse().expect("should parse test config");
    let state = AppState::new(Arc::new(config)).expect("AppState::new should succeed");
    (reviewlens::app(state.clone()), state)
}

fn click_request(member: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/click/{member}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_known_member_redirects_to_profile() {
    let (app, _state) = create_test_app();

    let response = app.oneshot(click_request("mira")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header");
    assert_eq!(location, "https://github.com/mira");
}

#[tokio::test]
async fn test_clicks_count_per_member() {
    let (app, state) = create_test_app();

    for _ in 0..2 {
        let response = app.clone().oneshot(click_request("mira")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    let response = app.oneshot(click_request("jonas")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let version = state.app_version().to_string();
    let exposition = state.metrics().gather().unwrap();
    assert!(exposition.contains(&format!(
        r#"reviewlens_member_clicks_total{{app_version="{version}",member_name="mira"}} 2"#
    )));
    assert!(exposition.contains(&format!(
        r#"reviewlens_member_clicks_total{{app_version="{version}",member_name="jonas"}} 1"#
    )));
}

#[tokio::test]
async fn test_unknown_member_returns_404_without_counting() {
    let (app, state) = create_test_app();

    let response = app.oneshot(click_request("nobody")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let exposition = state.metrics().gather().unwrap();
    assert!(
        !exposition.contains(r#"member_name="nobody""#),
        "404 must not create a counter series"
    );
}

#[tokio::test]
async fn test_member_lookup_is_case_sensitive() {
    let (app, _state) = create_test_app();

    let response = app.oneshot(click_request("Mira")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_lists_every_tracked_member() {
    let (app, _state) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    for member in reviewlens::members::TEAM {
        assert!(body.contains(&format!("/click/{}", member.name)));
    }
}
