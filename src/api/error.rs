use reqwest::StatusCode;
use thiserror::Error;

/// Every way a backend call can fail to produce a usable answer.
///
/// All variants belong to the "server unreachable" class: callers render them
/// and move on, nothing is retried. A `404` on the history endpoint is not an
/// error and never shows up here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Server error: {0}")]
    Status(StatusCode),
    #[error("Invalid response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// True when no HTTP response was received at all.
    pub fn is_network(&self) -> bool { matches!(self, Self::Network(_)) }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}
