//! Quotation API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cotizaciones", get(handler::list))
        .route("/api/cotizaciones/{id}", get(handler::detail))
}
