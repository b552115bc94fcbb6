//! quote-server - inventory catalog and sales quotation HTTP backend
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, server state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Connection pool, schema allow-list, repositories
//! └── utils/         # Errors, logging, validation, shared types
//! ```
//!
//! The server speaks JSON over REST against a multi-schema PostgreSQL
//! database. Every read endpoint is plain parameterized SQL plus
//! pagination; the one real write path is the order ingestion
//! transaction in [`db::repository::QuoteRepository`].

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};
