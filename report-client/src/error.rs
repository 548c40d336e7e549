use thiserror::Error;

/// Failures while producing or exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("relay request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("relay answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("relay reply has no response text")]
    MissingResponse,

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}
