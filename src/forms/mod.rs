//! Request payloads validated before they reach the record store.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid sku")]
    InvalidSku,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid category id")]
    InvalidCategoryId,
}

/// One rejected field in a client error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl FormError {
    /// Flattens the error into per-field violations named as in the JSON body.
    pub fn violations(&self) -> Vec<FieldViolation> {
        match self {
            FormError::Validation(errors) => {
                let mut violations = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, field_errors)| {
                        let field = camel_case(field.as_ref());
                        field_errors.iter().map(move |error| {
                            let message = error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| error.code.to_string());
                            FieldViolation::new(field.clone(), message)
                        })
                    })
                    .collect::<Vec<_>>();
                violations.sort_by(|a, b| a.field.cmp(&b.field));
                violations
            }
            FormError::InvalidSku => vec![FieldViolation::new("sku", self.to_string())],
            FormError::InvalidName => vec![FieldViolation::new("name", self.to_string())],
            FormError::InvalidCategoryId => {
                vec![FieldViolation::new("categoryIds", self.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_converts_snake_case_fields() {
        assert_eq!(camel_case("promotion_price"), "promotionPrice");
        assert_eq!(camel_case("sku"), "sku");
    }

    #[test]
    fn constraint_errors_name_their_field() {
        assert_eq!(FormError::InvalidCategoryId.violations()[0].field, "categoryIds");
    }
}
