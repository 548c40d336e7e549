use crate::config::RelaySettings;
use crate::error::ReportError;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use service_core::observability::inject_trace_headers;

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct RelayReply {
    response: Option<String>,
    error: Option<String>,
}

/// HTTP client for the relay's `/ask` endpoint.
pub struct RelayClient {
    client: Client,
    settings: RelaySettings,
}

impl RelayClient {
    pub fn new(settings: RelaySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }

    /// Send one prompt and return the generated text.
    ///
    /// Trace context and the caller's request ID are forwarded to the relay.
    pub async fn ask(&self, prompt: &str, request_id: Option<&str>) -> Result<String, ReportError> {
        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, request_id);

        let response = self
            .client
            .post(&self.settings.url)
            .headers(headers)
            .json(&PromptRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", self.settings.url, e);
                ReportError::Network(e)
            })?;

        let status = response.status();
        let reply: RelayReply = response.json().await?;

        if !status.is_success() {
            return Err(ReportError::Status {
                status: status.as_u16(),
                message: reply.error.unwrap_or_default(),
            });
        }

        reply.response.ok_or(ReportError::MissingResponse)
    }
}
