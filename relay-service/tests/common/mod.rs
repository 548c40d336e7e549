//! Shared helpers for relay-service integration tests.

#![allow(dead_code)]

use axum::{body::Body, http::Response};
use relay_service::config::{CorsConfig, GoogleConfig, ModelConfig, RelayConfig};
use secrecy::Secret;
use service_core::config::Config;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Config bound to a random local port with the default allow-list.
pub fn test_config(api_base: &str, api_key: Option<&str>) -> RelayConfig {
    RelayConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        google: GoogleConfig {
            api_key: api_key.map(|key| Secret::new(key.to_string())),
            api_base: api_base.to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-1.0-pro".to_string(),
        },
        cors: CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5174".to_string(),
            ],
        },
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
