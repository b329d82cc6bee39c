//! `noteforge-store` — Postgres persistence.
//!
//! One [`Store`] handle wraps a bounded connection pool; it is constructed
//! once at process startup and passed down explicitly (no module-level
//! singletons). Every tenant-scoped query carries a `tenant_id` predicate:
//! tenant isolation is enforced per query, never cached.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod notes;
pub mod schema;
pub mod tenants;
pub mod users;

pub use error::StoreError;
pub use notes::NoteWithAuthors;
pub use users::{AuthUser, UserWithTenant};

/// How long a request may wait for a pool connection before failing with a
/// retryable error.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the relational store. Cheap to clone (clones the pool handle).
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect eagerly, verifying the database is reachable.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Connect lazily: no round-trip until the first query. Used by tests
    /// that exercise the HTTP surface without a database.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
