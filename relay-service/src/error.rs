//! Errors surfaced by the relay endpoint.
//!
//! Each variant maps to one fixed message; provider details stay in the logs.

use crate::models::ErrorBody;
use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const MISSING_PROMPT_MESSAGE: &str = "Please provide a prompt.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate response from the AI model.";
pub const ORIGIN_REJECTED_MESSAGE: &str = "Not allowed by CORS";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request payload too large.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request has no prompt")]
    MissingPrompt,

    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),

    #[error("origin {0} is not allowed")]
    OriginRejected(String),

    #[error("request body exceeds the size limit")]
    PayloadTooLarge,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::OriginRejected(_) => StatusCode::FORBIDDEN,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingPrompt => MISSING_PROMPT_MESSAGE,
            RelayError::Generation(_) => GENERATION_FAILED_MESSAGE,
            RelayError::OriginRejected(_) => ORIGIN_REJECTED_MESSAGE,
            RelayError::PayloadTooLarge => PAYLOAD_TOO_LARGE_MESSAGE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_detail_is_not_part_of_public_message() {
        let err = RelayError::from(ProviderError::ApiError("quota exceeded".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), GENERATION_FAILED_MESSAGE);
    }

    #[test]
    fn missing_prompt_is_a_client_error() {
        assert_eq!(RelayError::MissingPrompt.status(), StatusCode::BAD_REQUEST);
    }
}
