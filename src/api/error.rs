// ABOUTME: Error types for the notification REST API client
// Display strings are shown to users verbatim after a "Failed to ..." prefix

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status. `message` is the server's own explanation when
    /// it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid API token")]
    InvalidToken,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
