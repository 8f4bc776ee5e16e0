//! Postgres helpers for the ignored database suites.
//!
//! Requires TEST_DATABASE_URL; run with `cargo test -- --ignored`.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;
use std::sync::{Arc, Mutex, OnceLock};

use placelink::shared::database::{Database, MIGRATIONS};

static DATABASE: OnceLock<Arc<Database>> = OnceLock::new();
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Shared Database over TEST_DATABASE_URL, migrated once
pub fn get_test_database() -> Arc<Database> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must be set for database tests");

            let manager = ConnectionManager::<PgConnection>::new(url);
            let pool = Pool::builder()
                .max_size(4)
                .build(manager)
                .expect("Failed to create test database pool");

            let mut conn = pool.get().expect("Failed to get test connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Failed to run migrations");

            Arc::new(Database::from_pool(pool))
        })
        .clone()
}

/// Serialize database tests; they share tables
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Truncate all pipeline tables
pub fn clean_test_db(database: &Database) {
    let mut conn = database.get_connection().expect("connection");

    diesel::sql_query("TRUNCATE TABLE place_score, place_detail, place_master CASCADE")
        .execute(&mut conn)
        .expect("Failed to truncate pipeline tables");
}
