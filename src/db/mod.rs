//! Database Module
//!
//! Owns the PostgreSQL connection pool and the schema allow-list. The
//! relational schema itself is externally owned; this service only reads
//! and writes it.

pub mod models;
pub mod repository;
pub mod schema;

pub use schema::{SchemaRef, SchemaRegistry};

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::utils::AppError;

/// Database service — owns a PostgreSQL connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Create a new database service backed by a connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to PostgreSQL: {e}")))?;

        tracing::info!(max_connections, "Database connection pool established");

        Ok(Self { pool })
    }

    /// Pool that defers connecting until first use. Lets request paths that
    /// never reach the database run without one.
    #[cfg(test)]
    pub fn connect_lazy(database_url: &str) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_url)
            .expect("invalid database url");
        Self { pool }
    }
}
