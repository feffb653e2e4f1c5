//! Business operations exposed to the transport layer.
//!
//! Services are plain functions generic over the repository traits so they
//! can be exercised against the Diesel store, a mock or an in-memory fake.

use thiserror::Error;

use crate::forms::{FieldViolation, FormError};
use crate::repository::errors::RepositoryError;

pub mod product;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before reaching the record store.
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("not found")]
    NotFound,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.violations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_errors_become_validation_errors() {
        let err = ServiceError::from(FormError::InvalidSku);
        match err {
            ServiceError::Validation(violations) => {
                assert_eq!(violations, vec![FieldViolation::new("sku", "invalid sku")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
