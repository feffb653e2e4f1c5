//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{Locale, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn list_products(&self, locale: &Locale) -> RepositoryResult<Vec<Product>>;
        fn list_products_paged(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)>;
        fn get_product_by_id(
            &self,
            id: ProductId,
            locale: &Locale,
        ) -> RepositoryResult<Option<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId>;
        fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<()>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }
}
