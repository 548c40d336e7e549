use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /ask`.
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(required, length(min = 1))]
    pub prompt: Option<String>,
}

/// Successful reply: the provider text, untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

/// Every failure reply carries a single fixed message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
