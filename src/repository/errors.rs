use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out waiting for the backend")]
    Timeout,

    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    #[error("Rejected by backend: {}", .0.as_deref().unwrap_or("no details"))]
    Rejected(Option<String>),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Message the backend attached to the failure, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Status { message, .. } | RepositoryError::Rejected(message) => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::Timeout
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_builder() {
            RepositoryError::InvalidEndpoint(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
