//! Record store abstraction for the product catalog.
//!
//! Services depend on the [`ProductReader`] and [`ProductWriter`] traits only;
//! [`DieselRepository`] is the SQLite implementation wired in by the server.

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        product::{NewProduct, Product, ProductFilter, UpdateProduct},
        types::{Locale, ProductId},
    },
    pagination::PageRequest,
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod product;

/// Diesel-backed record store sharing one connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checks out a scoped connection; it returns to the pool when dropped.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Typed request for the filtered product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    pub locale: Locale,
    pub filter: ProductFilter,
    pub pagination: Option<PageRequest>,
}

impl ProductListQuery {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            filter: ProductFilter::default(),
            pagination: None,
        }
    }

    pub fn filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

pub trait ProductReader {
    /// Every product translated into `locale`, in natural order.
    fn list_products(&self, locale: &Locale) -> RepositoryResult<Vec<Product>>;
    /// One invocation returning the total number of matching rows together
    /// with the requested slice of them.
    fn list_products_paged(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)>;
    fn get_product_by_id(&self, id: ProductId, locale: &Locale)
    -> RepositoryResult<Option<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId>;
    /// Overwrites the product; a missing id is a no-op.
    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<()>;
    /// Removes the product with its translations and category links; a
    /// missing id is a no-op.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}
