use diesel::connection::SimpleConnection;

mod common;

#[test]
fn test_creates_migrated_database() {
    let test_db = common::TestDb::new("test_creates_migrated_database.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys_are_enforced.db");
    let mut conn = test_db.pool().get().unwrap();

    let orphan = conn.batch_execute(
        "INSERT INTO product_translations (product_id, language_id, name) VALUES (999, 'en-US', 'Ghost');",
    );

    assert!(orphan.is_err());
}
