//! # QCM DB
//!
//! Connection pool and data access for the QCM API.
//!
//! Handlers never see SQL: they talk to the [`Store`] trait, implemented by
//! [`PgStore`] in production and by `MemoryStore` (feature `test-utils`) in
//! tests.
//!
//! # Example
//!
//! ```ignore
//! use qcm_config::DatabaseConfig;
//! use qcm_db::{PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! let store = PgStore::new(pool);
//! let users = store.list_users().await?;
//! ```

use std::time::Duration;

use qcm_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use postgres::PgStore;
pub use store::{QuizStore, Store, StoreError, StoreFuture, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens the process-wide PostgreSQL pool.
///
/// Callers queue for a connection when all `max_connections` are in use and
/// fail after `acquire_timeout_secs`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}
