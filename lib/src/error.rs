use rpsl::error::ParseError;

/// Error condition variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IRR query protocol errors.
    #[error(transparent)]
    Irr(#[from] irrc::Error),
    /// RPSL parsing errors.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// HTTP transport errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// Malformed JSON in a registry response.
    #[error("failed to decode registry response: {0}")]
    Json(#[from] serde_json::Error),
    /// The registry answered with an unexpected HTTP status.
    #[error("registry returned unexpected status {0}")]
    Status(reqwest::StatusCode),
    /// Other errors.
    #[error("{0}")]
    General(String),
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::General(value.to_string())
    }
}
