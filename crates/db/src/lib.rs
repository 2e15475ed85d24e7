//! Persistence for the reporter backend.
//!
//! - [`models`] -- entity structs and request DTOs
//! - [`stores`] -- one async trait per aggregate, plus the [`stores::Stores`] bundle
//! - [`repositories`] -- PostgreSQL implementations of the store traits
//! - [`memory`] -- in-memory implementation with the same semantics
//! - [`seed`] -- idempotent default data

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod stores;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
