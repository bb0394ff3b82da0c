//! # SchoolHub DB
//!
//! PostgreSQL connection pool setup.
//!
//! ```ignore
//! use schoolhub_db::init_db_pool;
//!
//! let pool = init_db_pool(&url, 10).await?;
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Opens a connection pool against `database_url`.
///
/// The returned pool is cheaply cloneable and is shared by every store.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "Connected to PostgreSQL");
    Ok(pool)
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
