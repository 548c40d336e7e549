//! Origin allow-list enforcement.
//!
//! Browsers get CORS headers only for listed origins, and a request that
//! names any other origin is turned away before it reaches a handler.
//! Requests without an `Origin` header are not browser cross-origin calls
//! and pass through.

use crate::error::RelayError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, Clone)]
pub struct AllowedOrigins(Arc<Vec<String>>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(Arc::new(origins))
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

pub async fn origin_guard(
    State(allowed): State<AllowedOrigins>,
    req: Request,
    next: Next,
) -> Response {
    let Some(origin) = req.headers().get(header::ORIGIN) else {
        return next.run(req).await;
    };

    match origin.to_str() {
        Ok(origin) if allowed.is_allowed(origin) => next.run(req).await,
        _ => {
            let origin = String::from_utf8_lossy(origin.as_bytes()).into_owned();
            tracing::warn!(origin = %origin, path = %req.uri().path(), "Rejected request from disallowed origin");
            RelayError::OriginRejected(origin).into_response()
        }
    }
}

/// CORS response headers for the allow-listed origins.
pub fn cors_layer(allowed: &AllowedOrigins) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_origins_exactly() {
        let allowed = AllowedOrigins::new(vec!["http://localhost:3000".to_string()]);

        assert!(allowed.is_allowed("http://localhost:3000"));
        assert!(!allowed.is_allowed("http://localhost:3000/"));
        assert!(!allowed.is_allowed("http://localhost:30001"));
        assert!(!allowed.is_allowed("https://localhost:3000"));
    }
}
