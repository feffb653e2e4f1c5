//! Error conversion glue between the domain value objects and the record
//! store.
//!
//! The domain layer must not depend on repository error types, so the
//! conversion lives here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

/// A stored row violating a domain constraint is malformed data, not a
/// client mistake.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::MalformedRow(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_mark_rows_as_malformed() {
        let err = RepositoryError::from(TypeConstraintError::EmptyString);
        assert!(matches!(err, RepositoryError::MalformedRow(msg) if msg == "value cannot be empty"));
    }
}
