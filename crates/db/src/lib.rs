//! PostgreSQL persistence for the placement activity log service.
//!
//! `models` holds `FromRow` row structs and DTOs; `repositories` holds the
//! zero-sized repository types whose async methods take an explicit pool,
//! connection, or transaction.

use sqlx::postgres::PgPoolOptions;

pub mod filters;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Pool size used when `DATABASE_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
