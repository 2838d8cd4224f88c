//! PostgreSQL persistence for users, movies, showtimes, bookings and sessions.
//!
//! Repositories are zero-sized structs whose async methods take `&PgPool` as
//! their first argument. Absent rows come back as `Option::None`; only
//! transport and constraint failures surface as `sqlx::Error`.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on pooled connections; the pool is the only backpressure.
const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from discrete connection options.
pub async fn create_pool_with(options: PgConnectOptions) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
