//! Shared fixtures for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use shop_catalog::db::{DbPool, establish_connection_pool};
use shop_catalog::domain::product::{NewProduct, ProductText};
use shop_catalog::domain::types::{CategoryId, Locale, ProductName, Sku};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory that is removed
/// when the value drops.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn locale(tag: &str) -> Locale {
    Locale::new(tag).expect("valid locale")
}

/// Builds an insert payload named `name` with code `sku` in `locale`.
pub fn new_product(sku: &str, name: &str, tag: &str, categories: &[i32]) -> NewProduct {
    NewProduct {
        sku: Sku::new(sku).expect("valid sku"),
        text: ProductText {
            locale: locale(tag),
            name: ProductName::new(name).expect("valid name"),
            description: None,
            content: None,
            seo_title: None,
            seo_alias: None,
            seo_keyword: None,
            seo_description: None,
        },
        thumbnail_image: None,
        image_url: None,
        image_list: None,
        price: Some(10.0),
        promotion_price: None,
        view_count: Some(0),
        is_active: true,
        category_ids: categories
            .iter()
            .map(|id| CategoryId::new(*id).expect("valid category"))
            .collect(),
    }
}
