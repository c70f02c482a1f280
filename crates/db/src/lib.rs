//! Folio persistence layer.
//!
//! PostgreSQL access through sqlx: `FromRow` models in [`models`] and
//! zero-sized repository structs in [`repositories`]. SQL is built at
//! runtime; migrations live in `db/migrations` at the workspace root and
//! are embedded at compile time.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

pub use repositories::engagement_store::PgEngagementStore;

/// Shared Postgres pool handle.
pub type DbPool = PgPool;

/// Maximum pooled connections.
const MAX_CONNECTIONS: u32 = 10;

/// How long to wait for a free connection before failing a request.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect a pool to `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
