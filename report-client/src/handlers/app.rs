use crate::handlers::report::ReportTemplate;
use axum::response::IntoResponse;

/// Empty report page: input form, no result yet.
pub async fn index() -> impl IntoResponse {
    ReportTemplate::empty(String::new())
}

pub async fn health_check() -> &'static str {
    "OK"
}
