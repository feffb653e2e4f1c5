//! Diesel models representing products, their translations and category links.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductText as DomainProductText,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{ProductId, ProductName, Sku, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for the locale-independent part of [`DomainProduct`].
pub struct Product {
    pub id: i32,
    pub sku: String,
    pub thumbnail_image: Option<String>,
    pub image_url: Option<String>,
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

#[derive(Debug, Clone, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_translations)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(primary_key(product_id, language_id))]
/// Localized text of a product for one language.
pub struct ProductTranslation {
    pub product_id: i32,
    pub language_id: String,
    pub name: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_alias: Option<String>,
    pub seo_keyword: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub sku: &'a str,
    pub thumbnail_image: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub image_list: Option<&'a str>,
    pub price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub view_count: Option<i32>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
/// Data used when overwriting a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub sku: &'a str,
    pub thumbnail_image: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub image_list: Option<&'a str>,
    pub price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub view_count: Option<i32>,
    pub is_active: bool,
    pub rate_total: Option<i32>,
    pub rate_count: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::product_translations)]
#[diesel(primary_key(product_id, language_id))]
#[diesel(treat_none_as_null = true)]
/// Insertable (and upsertable) translation row.
pub struct NewProductTranslation<'a> {
    pub product_id: i32,
    pub language_id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub content: Option<&'a str>,
    pub seo_title: Option<&'a str>,
    pub seo_alias: Option<&'a str>,
    pub seo_keyword: Option<&'a str>,
    pub seo_description: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
/// Link between a product and one of its categories.
pub struct NewProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}

impl TryFrom<(Product, ProductTranslation)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, text): (Product, ProductTranslation)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            sku: Sku::new(product.sku)?,
            name: ProductName::new(text.name)?,
            description: text.description,
            content: text.content,
            seo_title: text.seo_title,
            seo_alias: text.seo_alias,
            seo_keyword: text.seo_keyword,
            seo_description: text.seo_description,
            thumbnail_image: product.thumbnail_image,
            image_url: product.image_url,
            image_list: product.image_list,
            price: product.price,
            promotion_price: product.promotion_price,
            view_count: product.view_count,
            is_active: product.is_active,
            rate_total: product.rate_total,
            rate_count: product.rate_count,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            sku: product.sku.as_str(),
            thumbnail_image: product.thumbnail_image.as_deref(),
            image_url: product.image_url.as_deref(),
            image_list: product.image_list.as_deref(),
            price: product.price,
            promotion_price: product.promotion_price,
            view_count: product.view_count,
            is_active: product.is_active,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(product: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            sku: product.sku.as_str(),
            thumbnail_image: product.thumbnail_image.as_deref(),
            image_url: product.image_url.as_deref(),
            image_list: product.image_list.as_deref(),
            price: product.price,
            promotion_price: product.promotion_price,
            view_count: product.view_count,
            is_active: product.is_active,
            rate_total: product.rate_total,
            rate_count: product.rate_count,
            updated_at,
        }
    }
}

impl<'a> NewProductTranslation<'a> {
    pub fn new(product_id: i32, text: &'a DomainProductText) -> Self {
        Self {
            product_id,
            language_id: text.locale.as_str(),
            name: text.name.as_str(),
            description: text.description.as_deref(),
            content: text.content.as_deref(),
            seo_title: text.seo_title.as_deref(),
            seo_alias: text.seo_alias.as_deref(),
            seo_keyword: text.seo_keyword.as_deref(),
            seo_description: text.seo_description.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::Locale;

    fn sample_rows(name: &str) -> (Product, ProductTranslation) {
        let now = Utc::now().naive_utc();
        (
            Product {
                id: 5,
                sku: "SKU-5".to_string(),
                thumbnail_image: None,
                image_url: Some("/img/5.png".to_string()),
                image_list: None,
                price: Some(12.5),
                promotion_price: None,
                view_count: Some(3),
                is_active: true,
                rate_total: None,
                rate_count: None,
                created_at: now,
                updated_at: now,
            },
            ProductTranslation {
                product_id: 5,
                language_id: "en-US".to_string(),
                name: name.to_string(),
                description: Some("desc".to_string()),
                content: None,
                seo_title: None,
                seo_alias: Some("sku-5".to_string()),
                seo_keyword: None,
                seo_description: None,
            },
        )
    }

    #[test]
    fn rows_into_domain() {
        let product = DomainProduct::try_from(sample_rows("Shirt")).unwrap();
        assert_eq!(product.id.get(), 5);
        assert_eq!(product.sku.as_str(), "SKU-5");
        assert_eq!(product.name.as_str(), "Shirt");
        assert_eq!(product.description.as_deref(), Some("desc"));
        assert_eq!(product.price, Some(12.5));
        assert_eq!(product.seo_alias.as_deref(), Some("sku-5"));
    }

    #[test]
    fn blank_name_row_is_rejected() {
        let result = DomainProduct::try_from(sample_rows("  "));
        assert_eq!(result, Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn translation_borrows_domain_text() {
        let text = DomainProductText {
            locale: Locale::new("vi-VN").unwrap(),
            name: ProductName::new("Áo sơ mi").unwrap(),
            description: None,
            content: Some("<p>x</p>".to_string()),
            seo_title: None,
            seo_alias: None,
            seo_keyword: None,
            seo_description: None,
        };
        let row = NewProductTranslation::new(9, &text);
        assert_eq!(row.product_id, 9);
        assert_eq!(row.language_id, "vi-VN");
        assert_eq!(row.name, "Áo sơ mi");
        assert_eq!(row.content, Some("<p>x</p>"));
    }
}
