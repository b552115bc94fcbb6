//! Server state - shared references handed to every handler
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | config | Arc<Config> | Configuration (immutable) |
//! | pool | PgPool | PostgreSQL connection pool |
//! | schemas | Arc<SchemaRegistry> | Schema allow-list |

use std::sync::Arc;

use sqlx::PgPool;

use crate::core::Config;
use crate::db::{DbService, SchemaRegistry};

/// Shared server state. `Clone` is shallow: the pool and registry are
/// reference-counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<Config>,
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Schema allow-list built from `ALLOWED_SCHEMAS`
    pub schemas: Arc<SchemaRegistry>,
}

impl ServerState {
    /// Initialize state from configuration: build the connection pool and
    /// the schema registry.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::connect(&config.database_url, config.max_connections).await?;
        let schemas = SchemaRegistry::from_names(&config.allowed_schemas);
        tracing::info!(
            default_schema = schemas.default_schema(),
            allowed = schemas.allowed().len(),
            "Schema allow-list loaded"
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            pool: db.pool,
            schemas: Arc::new(schemas),
        })
    }
}
