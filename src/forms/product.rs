use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::product::{NewProduct, ProductText, UpdateProduct};
use crate::domain::types::{CategoryId, Locale, ProductName, Sku};
use crate::forms::FormError;

fn default_active() -> bool {
    true
}

fn validate_category_ids(ids: &Vec<i32>) -> Result<(), ValidationError> {
    if ids.iter().all(|id| *id > 0) {
        Ok(())
    } else {
        Err(ValidationError::new("category_id")
            .with_message("category ids must be positive".into()))
    }
}

/// JSON body accepted by the create and update product routes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    /// Product code.
    #[validate(length(min = 3, max = 50, message = "sku must be between 3 and 50 characters"))]
    pub sku: String,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    /// Rich HTML content; sanitized before persistence.
    pub content: Option<String>,
    #[validate(length(max = 255))]
    pub seo_title: Option<String>,
    #[validate(length(max = 255))]
    pub seo_alias: Option<String>,
    #[validate(length(max = 255))]
    pub seo_keyword: Option<String>,
    pub seo_description: Option<String>,
    pub thumbnail_image: Option<String>,
    pub image_url: Option<String>,
    pub image_list: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, message = "promotion price cannot be negative"))]
    pub promotion_price: Option<f64>,
    #[validate(range(min = 0))]
    pub view_count: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[validate(range(min = 0))]
    pub rate_total: Option<i32>,
    #[validate(range(min = 0))]
    pub rate_count: Option<i32>,
    #[serde(default)]
    #[validate(custom(function = "validate_category_ids"))]
    pub category_ids: Vec<i32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn sanitized(value: Option<String>) -> Option<String> {
    non_blank(value.map(|s| ammonia::clean(&s)))
}

impl ProductForm {
    fn text(&self, locale: Locale) -> Result<ProductText, FormError> {
        Ok(ProductText {
            locale,
            name: ProductName::new(self.name.as_str()).map_err(|_| FormError::InvalidName)?,
            description: sanitized(self.description.clone()),
            content: sanitized(self.content.clone()),
            seo_title: non_blank(self.seo_title.clone()),
            seo_alias: non_blank(self.seo_alias.clone()),
            seo_keyword: non_blank(self.seo_keyword.clone()),
            seo_description: non_blank(self.seo_description.clone()),
        })
    }

    fn sku(&self) -> Result<Sku, FormError> {
        Sku::new(self.sku.as_str()).map_err(|_| FormError::InvalidSku)
    }

    fn category_ids(&self) -> Result<Vec<CategoryId>, FormError> {
        let mut ids = self
            .category_ids
            .iter()
            .map(|id| CategoryId::new(*id).map_err(|_| FormError::InvalidCategoryId))
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort_unstable_by_key(|id| id.get());
        ids.dedup();
        Ok(ids)
    }

    /// Validates the form and converts it into an insert payload.
    pub fn into_new_product(self, locale: Locale) -> Result<NewProduct, FormError> {
        self.validate()?;

        Ok(NewProduct {
            sku: self.sku()?,
            text: self.text(locale)?,
            category_ids: self.category_ids()?,
            thumbnail_image: non_blank(self.thumbnail_image),
            image_url: non_blank(self.image_url),
            image_list: non_blank(self.image_list),
            price: self.price,
            promotion_price: self.promotion_price,
            view_count: self.view_count,
            is_active: self.is_active,
        })
    }

    /// Validates the form and converts it into an update payload.
    pub fn into_update_product(self, locale: Locale) -> Result<UpdateProduct, FormError> {
        self.validate()?;

        Ok(UpdateProduct {
            sku: self.sku()?,
            text: self.text(locale)?,
            category_ids: self.category_ids()?,
            thumbnail_image: non_blank(self.thumbnail_image),
            image_url: non_blank(self.image_url),
            image_list: non_blank(self.image_list),
            price: self.price,
            promotion_price: self.promotion_price,
            view_count: self.view_count,
            is_active: self.is_active,
            rate_total: self.rate_total,
            rate_count: self.rate_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(sku: &str) -> ProductForm {
        serde_json::from_value(serde_json::json!({
            "sku": sku,
            "name": " Linen shirt ",
            "content": "<p>Soft</p><script>alert(1)</script>",
            "seoAlias": "  ",
            "price": 19.5,
            "categoryIds": [3, 1, 3]
        }))
        .unwrap()
    }

    fn en() -> Locale {
        Locale::new("en-US").unwrap()
    }

    #[test]
    fn missing_is_active_defaults_to_true() {
        assert!(form("SKU-1").is_active);
    }

    #[test]
    fn short_sku_is_rejected() {
        let err = form("AB").into_new_product(en()).unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "sku");
    }

    #[test]
    fn negative_price_and_category_are_reported_per_field() {
        let mut form = form("SKU-1");
        form.promotion_price = Some(-1.0);
        form.category_ids = vec![0];

        let fields: Vec<_> = form
            .into_new_product(en())
            .unwrap_err()
            .violations()
            .into_iter()
            .map(|v| v.field)
            .collect();

        assert_eq!(fields, vec!["categoryIds", "promotionPrice"]);
    }

    #[test]
    fn conversion_normalizes_and_sanitizes() {
        let product = form("SKU-1").into_new_product(en()).unwrap();

        assert_eq!(product.sku.as_str(), "SKU-1");
        assert_eq!(product.text.name.as_str(), "Linen shirt");
        assert_eq!(product.text.content.as_deref(), Some("<p>Soft</p>"));
        assert_eq!(product.text.seo_alias, None);
        assert_eq!(product.text.locale, en());
        let ids: Vec<i32> = product.category_ids.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn update_payload_keeps_rating_aggregates() {
        let mut form = form("SKU-1");
        form.rate_total = Some(42);
        form.rate_count = Some(10);

        let updates = form.into_update_product(en()).unwrap();

        assert_eq!(updates.rate_total, Some(42));
        assert_eq!(updates.rate_count, Some(10));
    }
}
