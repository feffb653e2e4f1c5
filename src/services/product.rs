//! Product catalog operations, including the paged listing.

use crate::domain::product::{Product, ProductFilter};
use crate::domain::types::{Locale, ProductId};
use crate::forms::FieldViolation;
use crate::forms::product::ProductForm;
use crate::pagination::{PageRequest, PagedResult};
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

fn check_page(page: &PageRequest, max_page_size: usize) -> ServiceResult<()> {
    if page.page_size == 0 || page.page_size > max_page_size {
        return Err(ServiceError::Validation(vec![FieldViolation::new(
            "pageSize",
            format!("page size must be between 1 and {max_page_size}"),
        )]));
    }
    Ok(())
}

/// Returns one page of the products matching `filter` together with the
/// number of matching products before slicing.
///
/// The record store is asked exactly once; the page and its count come from
/// the same call. Page sizes outside `1..=max_page_size` are rejected before
/// the store is touched, while a page index past the end yields an empty page.
pub fn get_page<R>(
    repo: &R,
    filter: ProductFilter,
    page: PageRequest,
    locale: &Locale,
    max_page_size: usize,
) -> ServiceResult<PagedResult<Product>>
where
    R: ProductReader + ?Sized,
{
    check_page(&page, max_page_size)?;

    let query = ProductListQuery::new(locale.clone())
        .filter(filter)
        .paginate(page);

    let (total_row, items) = repo.list_products_paged(query).map_err(|e| {
        log::error!("Failed to list products page {page:?}: {e}");
        e
    })?;

    Ok(PagedResult::new(items, page, total_row))
}

/// Lists every product available in `locale`.
pub fn list_products<R>(repo: &R, locale: &Locale) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products(locale).map_err(|e| {
        log::error!("Failed to list products: {e}");
        ServiceError::from(e)
    })
}

pub fn get_product<R>(repo: &R, product_id: i32, locale: &Locale) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.get_product_by_id(product_id, locale)
        .map_err(|e| {
            log::error!("Failed to load product {product_id}: {e}");
            e
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates the form and persists a new product, returning its id.
pub fn create_product<R>(repo: &R, form: ProductForm, locale: &Locale) -> ServiceResult<ProductId>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form.into_new_product(locale.clone())?;

    repo.create_product(&new_product).map_err(|e| {
        log::error!("Failed to create product {}: {e}", new_product.sku);
        ServiceError::from(e)
    })
}

/// Validates the form and overwrites the product. Updating an id that does
/// not exist succeeds without changes.
pub fn update_product<R>(
    repo: &R,
    product_id: i32,
    form: ProductForm,
    locale: &Locale,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let updates = form.into_update_product(locale.clone())?;

    // Non-positive ids never name a stored product.
    let Ok(product_id) = ProductId::new(product_id) else {
        return Ok(());
    };

    repo.update_product(product_id, &updates).map_err(|e| {
        log::error!("Failed to update product {product_id}: {e}");
        ServiceError::from(e)
    })
}

pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let Ok(product_id) = ProductId::new(product_id) else {
        return Ok(());
    };

    repo.delete_product(product_id).map_err(|e| {
        log::error!("Failed to delete product {product_id}: {e}");
        ServiceError::from(e)
    })
}
