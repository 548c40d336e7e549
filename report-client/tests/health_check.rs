use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use report_client::config::RelaySettings;
use report_client::services::RelayClient;
use report_client::startup::build_router;
use report_client::AppState;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    let relay_client = Arc::new(RelayClient::new(RelaySettings {
        url: "http://127.0.0.1:9/ask".to_string(),
    }));
    build_router(AppState::new(relay_client))
}

#[tokio::test]
async fn health_check_works() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn index_shows_form_without_result() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Generate Report"));
    assert!(!html.contains("Download as PDF"));
}
