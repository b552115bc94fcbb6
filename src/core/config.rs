//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | DATABASE_URL | (required) | PostgreSQL connection string |
//! | PORT | 8080 | HTTP listen port |
//! | DATABASE_MAX_CONNECTIONS | 5 | Connection pool size |
//! | ALLOWED_SCHEMAS | public | Comma-separated schema allow-list; first entry is the default |
//! | ALLOWED_ORIGIN | (unset) | Comma-separated CORS origins; unset allows any origin |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | Directory for daily rolling log files |

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Connection pool size
    pub max_connections: u32,
    /// Schema allow-list; the first entry is the default schema
    pub allowed_schemas: Vec<String>,
    /// CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
    /// Running environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only `DATABASE_URL` is required; everything else falls back to a
    /// documented default.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            allowed_schemas: split_csv(
                &std::env::var("ALLOWED_SCHEMAS").unwrap_or_else(|_| "public".into()),
            ),
            allowed_origins: std::env::var("ALLOWED_ORIGIN")
                .map(|v| split_csv(&v))
                .unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }
}

/// Split a comma-separated variable into trimmed, non-empty entries.
fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_trims_and_drops_empty() {
        assert_eq!(
            split_csv(" public , tienda ,, bodega "),
            vec!["public", "tienda", "bodega"]
        );
    }

    #[test]
    fn test_split_csv_empty_input() {
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ,").is_empty());
    }
}
