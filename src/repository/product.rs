//! Repository implementation for catalog products.

use chrono::Utc;
use diesel::{
    Connection,
    prelude::*,
    sqlite::{Sqlite, SqliteConnection},
};

use crate::{
    domain::{
        product::{NewProduct, Product, UpdateProduct},
        types::{CategoryId, Locale, ProductId},
    },
    models::product::{
        NewProduct as DbNewProduct, NewProductCategory as DbNewProductCategory,
        NewProductTranslation as DbNewProductTranslation, Product as DbProduct,
        ProductTranslation as DbProductTranslation, UpdateProduct as DbUpdateProduct,
    },
    pagination::PageRequest,
    repository::{
        DieselRepository, ProductListQuery, ProductReader, ProductWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

type ProductRow = (DbProduct, DbProductTranslation);

fn into_domain(rows: Vec<ProductRow>) -> RepositoryResult<Vec<Product>> {
    rows.into_iter()
        .map(|row| Product::try_from(row).map_err(RepositoryError::from))
        .collect()
}

const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `keyword` literally anywhere in a value.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `OFFSET` and `LIMIT` of a page, or `None` when the offset does not fit
/// into an SQL integer.
fn sql_window(page: &PageRequest) -> Option<(i64, i64)> {
    let offset = page.page_index.checked_mul(page.page_size)?;
    let offset = i64::try_from(offset).ok()?;
    let limit = i64::try_from(page.page_size).ok()?;
    Some((offset, limit))
}

fn category_links(product_id: i32, category_ids: &[CategoryId]) -> Vec<DbNewProductCategory> {
    category_ids
        .iter()
        .map(|category_id| DbNewProductCategory {
            product_id,
            category_id: category_id.get(),
        })
        .collect()
}

fn insert_category_links(
    conn: &mut SqliteConnection,
    product_id: i32,
    category_ids: &[CategoryId],
) -> QueryResult<usize> {
    let links = category_links(product_id, category_ids);
    if links.is_empty() {
        return Ok(0);
    }

    use crate::schema::product_categories;
    diesel::insert_into(product_categories::table)
        .values(&links)
        .execute(conn)
}

impl ProductReader for DieselRepository {
    fn list_products(&self, locale: &Locale) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{product_translations, products};

        let mut conn = self.conn()?;
        let rows = products::table
            .inner_join(product_translations::table)
            .filter(product_translations::language_id.eq(locale.as_str()))
            .order(products::id.asc())
            .load::<ProductRow>(&mut conn)?;

        into_domain(rows)
    }

    fn list_products_paged(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{product_categories, product_translations, products};

        let mut conn = self.conn()?;

        let pattern = query.filter.keyword.as_deref().map(like_pattern);

        let query_builder = || {
            let mut items = products::table
                .inner_join(product_translations::table)
                .filter(product_translations::language_id.eq(query.locale.as_str()))
                .into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                items = items.filter(
                    product_translations::name
                        .like(pattern.as_str())
                        .escape(LIKE_ESCAPE)
                        .or(products::sku.like(pattern.as_str()).escape(LIKE_ESCAPE)),
                );
            }

            if let Some(category_id) = query.filter.category_id {
                let in_category = product_categories::table
                    .filter(product_categories::category_id.eq(category_id.get()))
                    .select(product_categories::product_id);
                items = items.filter(products::id.eq_any(in_category));
            }

            items
        };

        // Count and page share one transaction so both read the same snapshot.
        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total = query_builder().count().get_result::<i64>(conn)?;

            let mut items = query_builder().order(products::id.asc());
            if let Some(page) = &query.pagination {
                // An offset beyond i64 is past every row SQLite can hold.
                let Some((offset, limit)) = sql_window(page) else {
                    return Ok((total, Vec::new()));
                };
                items = items.offset(offset).limit(limit);
            }
            let rows = items.load::<ProductRow>(conn)?;

            Ok((total, rows))
        })?;

        Ok((total as usize, into_domain(rows)?))
    }

    fn get_product_by_id(
        &self,
        id: ProductId,
        locale: &Locale,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::{product_translations, products};

        let mut conn = self.conn()?;
        let row = products::table
            .inner_join(product_translations::table)
            .filter(products::id.eq(id.get()))
            .filter(product_translations::language_id.eq(locale.as_str()))
            .first::<ProductRow>(&mut conn)
            .optional()?;

        row.map(|row| Product::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId> {
        use crate::schema::{product_translations, products};

        let mut conn = self.conn()?;
        let db_new_product: DbNewProduct = new_product.into();

        let id = conn.transaction::<i32, diesel::result::Error, _>(|conn| {
            let id = diesel::insert_into(products::table)
                .values(&db_new_product)
                .returning(products::id)
                .get_result::<i32>(conn)?;

            diesel::insert_into(product_translations::table)
                .values(&DbNewProductTranslation::new(id, &new_product.text))
                .execute(conn)?;

            insert_category_links(conn, id, &new_product.category_ids)?;

            Ok(id)
        })?;

        Ok(ProductId::new(id)?)
    }

    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<()> {
        use crate::schema::{product_categories, product_translations, products};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::new(updates, Utc::now().naive_utc());
        let translation = DbNewProductTranslation::new(id.get(), &updates.text);

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let affected = diesel::update(products::table.find(id.get()))
                .set(&db_updates)
                .execute(conn)?;
            if affected == 0 {
                return Ok(());
            }

            diesel::insert_into(product_translations::table)
                .values(&translation)
                .on_conflict((
                    product_translations::product_id,
                    product_translations::language_id,
                ))
                .do_update()
                .set(&translation)
                .execute(conn)?;

            diesel::delete(
                product_categories::table.filter(product_categories::product_id.eq(id.get())),
            )
            .execute(conn)?;
            insert_category_links(conn, id.get(), &updates.category_ids)?;

            Ok(())
        })
        .map_err(RepositoryError::from)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        use crate::schema::{product_categories, product_translations, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            diesel::delete(
                product_categories::table.filter(product_categories::product_id.eq(id.get())),
            )
            .execute(conn)?;
            diesel::delete(
                product_translations::table.filter(product_translations::product_id.eq(id.get())),
            )
            .execute(conn)?;
            diesel::delete(products::table.find(id.get())).execute(conn)?;
            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("shirt"), "%shirt%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn sql_window_converts_small_pages() {
        assert_eq!(sql_window(&PageRequest::new(2, 4)), Some((8, 4)));
    }

    #[test]
    fn sql_window_rejects_offsets_beyond_i64() {
        assert_eq!(sql_window(&PageRequest::new(1 << 62, 2)), None);
        assert_eq!(sql_window(&PageRequest::new(usize::MAX, 2)), None);
    }
}
