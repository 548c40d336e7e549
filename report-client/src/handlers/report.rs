use crate::report::{build_prompt, format_lines, format_response_text, pdf::PDF_FILENAME, render_pdf};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::observability::extract_request_id;
use tower_sessions::Session;

/// Session key holding the raw relay text of the report on display.
pub const RESPONSE_TEXT_KEY: &str = "response_text";

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub text: String,
    pub formatted: Option<String>,
}

impl ReportTemplate {
    pub fn empty(text: String) -> Self {
        Self {
            text,
            formatted: None,
        }
    }
}

#[derive(Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub text: String,
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Session error: {}", e))
}

/// Build the analysis prompt, ask the relay and show the formatted answer.
///
/// Relay failures are logged and leave the page without a result; no error
/// message is shown.
pub async fn generate_report(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(payload): Form<ReportRequest>,
) -> Result<ReportTemplate, AppError> {
    let prompt = build_prompt(&payload.text);
    let request_id = extract_request_id(&headers);

    match state
        .relay_client
        .ask(&prompt, request_id.as_deref())
        .await
    {
        Ok(response_text) => {
            let formatted = format_response_text(&response_text);
            if formatted.is_empty() {
                session
                    .remove::<String>(RESPONSE_TEXT_KEY)
                    .await
                    .map_err(session_error)?;
                tracing::warn!(input_len = payload.text.len(), "Relay returned an empty report");
                return Ok(ReportTemplate::empty(payload.text));
            }

            session
                .insert(RESPONSE_TEXT_KEY, &response_text)
                .await
                .map_err(session_error)?;

            tracing::info!(
                input_len = payload.text.len(),
                response_len = response_text.len(),
                "Report generated"
            );

            Ok(ReportTemplate {
                text: payload.text,
                formatted: Some(formatted),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, relay = %state.relay_client.url(), "An error occurred while generating the report");
            session
                .remove::<String>(RESPONSE_TEXT_KEY)
                .await
                .map_err(session_error)?;

            Ok(ReportTemplate::empty(payload.text))
        }
    }
}

/// Export the report currently shown in this session as `report.pdf`.
pub async fn download_pdf(session: Session) -> Result<Response, AppError> {
    let response_text = session
        .get::<String>(RESPONSE_TEXT_KEY)
        .await
        .map_err(session_error)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No report to export")))?;

    let bytes = render_pdf(&format_lines(&response_text))
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    tracing::info!(size = bytes.len(), "Exported report PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", PDF_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response())
}
