//! Optional PostgreSQL pool.
//!
//! Only its presence is reported (health endpoint); no relay path reads or
//! writes through it.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::error::AppResult;

#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(5)
            .min_connections(0)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
    }

    /// Connect eagerly; fails if the database is unreachable.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = Self::options().connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Build the pool without opening a connection.
    #[cfg(test)]
    fn connect_lazy(database_url: &str) -> AppResult<Self> {
        let pool = Self::options().connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
