//! Gemini provider and end-to-end relay tests against a local stub of the
//! Gemini API.

mod common;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use common::test_config;
use relay_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use relay_service::services::providers::{GenerationParams, ProviderError, TextProvider};
use relay_service::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    requests: Arc<Mutex<Vec<(String, String, Value)>>>,
}

async fn generate_content(
    State(state): State<StubState>,
    Path(model_method): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push((
        model_method,
        query.get("key").cloned().unwrap_or_default(),
        body,
    ));
    (state.status, Json(state.reply.clone()))
}

/// Start a fake Gemini API; returns its base URL and the captured requests.
async fn spawn_stub(
    status: StatusCode,
    reply: Value,
) -> (String, Arc<Mutex<Vec<(String, String, Value)>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/v1beta/models/:model_method", post(generate_content))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/v1beta", port), requests)
}

fn provider(api_base: &str, api_key: Option<&str>) -> GeminiTextProvider {
    GeminiTextProvider::new(GeminiConfig {
        api_key: api_key.map(|key| Secret::new(key.to_string())),
        model: "gemini-1.0-pro".to_string(),
        api_base: api_base.to_string(),
    })
}

fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn sends_single_turn_request_with_fixed_settings() {
    let (base, requests) = spawn_stub(StatusCode::OK, text_reply("Hi there")).await;

    let text = provider(&base, Some("test-key"))
        .generate("Hello", &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(text, "Hi there");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (model_method, key, body) = &requests[0];
    assert_eq!(model_method, "gemini-1.0-pro:generateContent");
    assert_eq!(key, "test-key");
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
    assert_eq!(body["generationConfig"]["topK"], 1);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);

    let categories: Vec<&str> = body["safetySettings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        vec![
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
    );
    assert!(body["safetySettings"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE"));
}

#[tokio::test]
async fn rate_limit_status_maps_to_rate_limited() {
    let (base, _) = spawn_stub(StatusCode::TOO_MANY_REQUESTS, json!({})).await;

    let err = provider(&base, Some("test-key"))
        .generate("Hello", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let (base, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "boom" } }),
    )
    .await;

    let err = provider(&base, Some("test-key"))
        .generate("Hello", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn missing_api_key_fails_without_network_call() {
    let (base, requests) = spawn_stub(StatusCode::OK, text_reply("unused")).await;

    let err = provider(&base, None)
        .generate("Hello", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotConfigured(_)));
    assert!(requests.lock().unwrap().is_empty());
}

async fn spawn_relay(api_base: &str, api_key: Option<&str>) -> u16 {
    let app = Application::build(test_config(api_base, api_key))
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    port
}

#[tokio::test]
async fn relay_returns_stubbed_provider_text() {
    let (base, _) = spawn_stub(StatusCode::OK, text_reply("Hi there")).await;
    let port = spawn_relay(&base, Some("test-key")).await;

    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/ask", port))
        .json(&json!({ "prompt": "Hello" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "response": "Hi there" }));
}

#[tokio::test]
async fn relay_hides_safety_block_details() {
    let (base, _) = spawn_stub(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;
    let port = spawn_relay(&base, Some("test-key")).await;

    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/ask", port))
        .json(&json!({ "prompt": "Hello" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "Failed to generate response from the AI model." })
    );
}

#[tokio::test]
async fn relay_without_api_key_fails_every_request() {
    let (base, requests) = spawn_stub(StatusCode::OK, text_reply("unused")).await;
    let port = spawn_relay(&base, None).await;

    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/ask", port))
        .json(&json!({ "prompt": "Hello" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(requests.lock().unwrap().is_empty());
}
