//! Query strings and response bodies of the product API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::product::ProductFilter;
use crate::domain::types::CategoryId;
use crate::forms::FieldViolation;
use crate::pagination::PageRequest;

/// Query parameters accepted by `GET /api/{culture}/product/paging`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Substring matched against the product name and code.
    pub keyword: Option<String>,
    /// Category to restrict to; `0` or absent means every category.
    #[param(minimum = 0)]
    pub category_id: Option<i32>,
    /// Zero-based page number.
    #[param(minimum = 0)]
    pub page_index: usize,
    /// Number of products per page, at most the configured `max_page_size`.
    #[param(minimum = 1)]
    pub page_size: usize,
}

impl ProductsQuery {
    /// Splits the query into the listing filter and the page to return.
    ///
    /// A negative category id is reported as a violation of `categoryId`.
    pub fn into_parts(self) -> Result<(ProductFilter, PageRequest), FieldViolation> {
        let category_id = match self.category_id {
            None | Some(0) => None,
            Some(id) => Some(CategoryId::new(id).map_err(|_| {
                FieldViolation::new("categoryId", "category id cannot be negative")
            })?),
        };

        Ok((
            ProductFilter::new(self.keyword, category_id),
            PageRequest::new(self.page_index, self.page_size),
        ))
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.errors = violations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category_id: Option<i32>) -> ProductsQuery {
        ProductsQuery {
            keyword: Some("  ".to_string()),
            category_id,
            page_index: 2,
            page_size: 4,
        }
    }

    #[test]
    fn zero_category_means_no_filter() {
        let (filter, page) = query(Some(0)).into_parts().unwrap();
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(page, PageRequest::new(2, 4));
    }

    #[test]
    fn negative_category_is_rejected() {
        let violation = query(Some(-3)).into_parts().unwrap_err();
        assert_eq!(violation.field, "categoryId");
    }

    #[test]
    fn camel_case_query_string_is_parsed() {
        let parsed: ProductsQuery =
            serde_json::from_str(r#"{"keyword":"shirt","categoryId":3,"pageIndex":1,"pageSize":10}"#)
                .unwrap();
        let (filter, page) = parsed.into_parts().unwrap();
        assert_eq!(filter.keyword.as_deref(), Some("shirt"));
        assert_eq!(filter.category_id.map(|c| c.get()), Some(3));
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn error_body_omits_empty_violations() {
        let json = serde_json::to_value(ErrorBody::new("Product not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Product not found" }));
    }
}
