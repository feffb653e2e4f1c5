use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::types::{CategoryId, Locale, ProductId, ProductName, Sku};

/// Catalog product with its text fields resolved for one locale.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub sku: Sku,
    pub name: ProductName,
    pub description: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_alias: Option<String>,
    pub seo_keyword: Option<String>,
    pub seo_description: Option<String>,
    pub thumbnail_image: Option<String>,
    pub image_url: Option<String>,
    /// Serialized list of additional image references.
    pub image_list: Option<String>,
    pub price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub view_count: Option<i32>,
    pub is_active: bool,
    pub rate_total: Option<i32>,
    pub rate_count: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Language-dependent fields written for a single locale.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductText {
    pub locale: Locale,
    pub name: ProductName,
    pub description: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_alias: Option<String>,
    pub seo_keyword: Option<String>,
    pub seo_description: Option<String>,
}

/// Payload used to insert a product.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub sku: Sku,
    pub text: ProductText,
    pub thumbnail_image: Option<String>,
    pub image_url: Option<String>,
    pub image_list: Option<String>,
    pub price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub view_count: Option<i32>,
    pub is_active: bool,
    pub category_ids: Vec<CategoryId>,
}

/// Payload used to overwrite an existing product.
///
/// Unlike [`NewProduct`] it carries the rating aggregates, which are only
/// maintained once a product exists.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProduct {
    pub sku: Sku,
    pub text: ProductText,
    pub thumbnail_image: Option<String>,
    pub image_url: Option<String>,
    pub image_list: Option<String>,
    pub price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub view_count: Option<i32>,
    pub is_active: bool,
    pub rate_total: Option<i32>,
    pub rate_count: Option<i32>,
    pub category_ids: Vec<CategoryId>,
}

/// Narrowing criteria applied before pagination and counting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Substring matched against the localized name and the product code.
    pub keyword: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl ProductFilter {
    /// Builds a filter, treating a blank keyword as "match all".
    #[must_use]
    pub fn new(keyword: Option<String>, category_id: Option<CategoryId>) -> Self {
        Self {
            keyword: keyword
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_is_dropped() {
        let filter = ProductFilter::new(Some("   ".to_string()), None);
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn keyword_is_trimmed() {
        let category = CategoryId::new(3).unwrap();
        let filter = ProductFilter::new(Some(" shirt ".to_string()), Some(category));
        assert_eq!(filter.keyword.as_deref(), Some("shirt"));
        assert_eq!(filter.category_id, Some(category));
    }
}
