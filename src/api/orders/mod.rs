//! Order ingestion API module

mod handler;

pub use handler::{CustomerPayload, OrderItemPayload, OrderRequest, OrderResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::create))
}
