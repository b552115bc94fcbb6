//! Repository Module
//!
//! Parameterized SQL access to the catalog and quotation tables. Every
//! repository holds a pool clone; table references always go through
//! [`crate::db::SchemaRef`] so only allow-listed schema names reach the
//! generated SQL.

pub mod catalog;
pub mod quote;

// Re-exports
pub use catalog::CatalogRepository;
pub use quote::QuoteRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("SKUs no encontrados en {schema}.inv_items: {}", .missing.join(", "))]
    SkusNotFound {
        schema: String,
        missing: Vec<String>,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sku_message_lists_every_sku() {
        let err = RepoError::SkusNotFound {
            schema: "tienda".to_string(),
            missing: vec!["ZZZ".to_string(), "YYY".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "SKUs no encontrados en tienda.inv_items: ZZZ, YYY"
        );
    }
}
