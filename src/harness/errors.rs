use thiserror::Error;

/// Why a single test request did not pass.
///
/// Every variant is reported and tallied as one failed test; none of them
/// stops the run.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("Expected {expected}, got {actual}")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },
    #[error("Error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error: request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RequestFailure {
    /// Raw response body, only available when the server answered
    pub fn response_body(&self) -> Option<&str> {
        match self {
            RequestFailure::StatusMismatch { body, .. } => Some(body),
            _ => None,
        }
    }
}
