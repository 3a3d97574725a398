use thiserror::Error;

use crate::forms::FormError;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    /// Rejected state change: lifecycle violation or duplicate unique value.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::TypeConstraint(inner) => ServiceError::TypeConstraint(inner.to_string()),
            other => ServiceError::Form(other.to_string()),
        }
    }
}
