use thiserror::Error;

use crate::domain::resource::ResourceKind;
use crate::repository::errors::RepositoryError;

pub mod dashboard;
pub mod fetch;
pub mod mutation;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Failed to decode {kind} record: {message}")]
    Decode {
        kind: ResourceKind,
        message: String,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Text worth showing to the operator as is: the backend's own message or
    /// a form validation message.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ServiceError::Repository(err) => err.backend_message(),
            ServiceError::Form(message) => Some(message),
            _ => None,
        }
    }
}
