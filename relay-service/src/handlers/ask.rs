use crate::error::RelayError;
use crate::models::{AskRequest, AskResponse};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::time::Instant;
use validator::Validate;

/// `POST /ask`: forward one prompt to the provider and return its text as-is.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, RelayError> {
    let prompt = match payload {
        Ok(Json(request)) if request.validate().is_ok() => request.prompt.unwrap_or_default(),
        Ok(_) => {
            metrics::record_request("missing_prompt");
            return Err(RelayError::MissingPrompt);
        }
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            metrics::record_request("payload_too_large");
            return Err(RelayError::PayloadTooLarge);
        }
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable /ask body");
            metrics::record_request("missing_prompt");
            return Err(RelayError::MissingPrompt);
        }
    };

    let start = Instant::now();
    let result = state
        .text_provider
        .generate(&prompt, &state.params)
        .await;
    metrics::record_provider_latency(&state.model, start.elapsed().as_secs_f64());

    match result {
        Ok(response) => {
            tracing::info!(
                model = %state.model,
                prompt_len = prompt.len(),
                response_len = response.len(),
                "Generated response"
            );
            metrics::record_request("ok");
            Ok(Json(AskResponse { response }))
        }
        Err(e) => {
            tracing::error!(model = %state.model, error = %e, "Provider call failed");
            metrics::record_provider_error(e.kind());
            metrics::record_request("provider_error");
            Err(RelayError::from(e))
        }
    }
}
