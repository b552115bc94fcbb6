//! Catalog API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/skus", get(handler::list))
        .route("/api/sku/{sku}", get(handler::detail))
}
