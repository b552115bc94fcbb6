//! Order ingestion endpoint
//!
//! `POST /api/orders` turns a WooCommerce-style order payload into a
//! quotation header plus line items, atomically. Validation collects
//! every violated field before anything touches the database; the write
//! path itself lives in [`QuoteRepository::ingest_order`].

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{IngestOutcome, NewQuote, NewQuoteItem};
use crate::db::repository::QuoteRepository;
use crate::utils::{AppError, AppResult};

/// Order payload (WooCommerce-like)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderRequest {
    pub schema: Option<String>,

    #[validate(range(min = 1, message = "order_id debe ser un entero positivo"))]
    pub order_id: i64,

    #[validate(nested)]
    pub customer: CustomerPayload,

    pub reference: Option<String>,

    #[validate(length(min = 1, message = "items no puede estar vacío"), nested)]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "name es obligatorio"))]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[validate(email(message = "email inválido"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OrderItemPayload {
    #[validate(length(min = 1, message = "sku es obligatorio"))]
    pub sku: String,

    #[validate(length(min = 1, message = "name es obligatorio"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "qty debe ser mayor que cero"))]
    pub qty: f64,

    #[validate(range(min = 0.0, message = "price no puede ser negativo"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "discount debe estar entre 0 y 100"))]
    pub discount: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub ok: bool,
    pub idcotizacion: i64,
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    pub message: String,
}

impl OrderRequest {
    fn into_new_quote(self) -> Result<NewQuote, AppError> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                Ok(NewQuoteItem {
                    qty: to_decimal(item.qty, "qty")?,
                    price: to_decimal(item.price, "price")?,
                    discount: to_decimal(item.discount, "discount")?,
                    sku: item.sku,
                    name: item.name,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(NewQuote {
            order_id: self.order_id,
            customer_name: self.customer.name,
            customer_phone: self.customer.phone,
            customer_email: self.customer.email,
            reference: self.reference,
            items,
        })
    }
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::try_from(value)
        .map_err(|_| AppError::validation(format!("{field} no es un número representable")))
}

/// POST /api/orders - create quotation (header + items) atomically
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<OrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    body.validate()?;

    let schema = state.schemas.resolve(body.schema.as_deref())?;
    let order_id = body.order_id;
    let order = body.into_new_quote()?;

    let repo = QuoteRepository::new(state.pool.clone());
    match repo.ingest_order(&schema, &order).await? {
        IngestOutcome::AlreadyExists { id } => Ok(Json(OrderResponse {
            ok: true,
            idcotizacion: id,
            schema: schema.name().to_string(),
            idempotent: Some(true),
            items: None,
            message: format!("Cotización ya existía para idcotizacionweb={order_id}"),
        })),
        IngestOutcome::Created { id, items } => Ok(Json(OrderResponse {
            ok: true,
            idcotizacion: id,
            schema: schema.name().to_string(),
            idempotent: None,
            items: Some(items),
            message: "Cotización creada con éxito".to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::core::{Config, ServerState, build_app};
    use crate::db::{DbService, SchemaRegistry};

    fn test_state() -> ServerState {
        let config = Config {
            database_url: "postgres://postgres@localhost:1/unreachable".to_string(),
            http_port: 0,
            max_connections: 1,
            allowed_schemas: vec!["public".to_string(), "tienda".to_string()],
            allowed_origins: vec![],
            environment: "test".to_string(),
        };
        let db = DbService::connect_lazy(&config.database_url);
        let schemas = SchemaRegistry::from_names(&config.allowed_schemas);
        ServerState {
            config: Arc::new(config),
            pool: db.pool,
            schemas: Arc::new(schemas),
        }
    }

    async fn post_orders(body: Value) -> (StatusCode, Value) {
        let app = build_app(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    fn valid_order() -> Value {
        json!({
            "order_id": 1001,
            "customer": { "name": "Ana", "email": "a@x.com" },
            "items": [{ "sku": "ABC", "name": "Widget", "qty": 2, "price": 10.5 }]
        })
    }

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let request: OrderRequest = serde_json::from_value(valid_order()).unwrap();
        assert_eq!(request.customer.phone, "");
        assert_eq!(request.items[0].discount, 0.0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_failing_field() {
        let request: OrderRequest = serde_json::from_value(json!({
            "order_id": 1001,
            "customer": { "name": "Ana", "email": "not-an-email" },
            "items": [{ "sku": "ABC", "name": "Widget", "qty": 2, "price": -5.0 }]
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let rendered = serde_json::to_string(&errors).unwrap();
        assert!(rendered.contains("email"));
        assert!(rendered.contains("price"));
    }

    #[test]
    fn test_nan_qty_fails_validation() {
        let request = OrderRequest {
            schema: None,
            order_id: 1,
            customer: CustomerPayload {
                name: "Ana".to_string(),
                phone: String::new(),
                email: "a@x.com".to_string(),
            },
            reference: None,
            items: vec![OrderItemPayload {
                sku: "ABC".to_string(),
                name: "Widget".to_string(),
                qty: f64::NAN,
                price: 1.0,
                discount: 0.0,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[tokio::test]
    async fn test_invalid_payload_returns_400_with_all_fields() {
        let (status, body) = post_orders(json!({
            "order_id": 1001,
            "customer": { "name": "Ana", "email": "not-an-email" },
            "items": [{ "sku": "ABC", "name": "Widget", "qty": 2, "price": -5.0 }]
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
        let detail = body["error"].to_string();
        assert!(detail.contains("email"));
        assert!(detail.contains("price"));
    }

    #[tokio::test]
    async fn test_empty_items_rejected() {
        let mut order = valid_order();
        order["items"] = json!([]);
        let (status, body) = post_orders(order).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
    }

    #[tokio::test]
    async fn test_non_positive_order_id_rejected() {
        let mut order = valid_order();
        order["order_id"] = json!(0);
        let (status, body) = post_orders(order).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
    }

    #[tokio::test]
    async fn test_unlisted_schema_rejected_before_any_sql() {
        let mut order = valid_order();
        order["schema"] = json!("pg_catalog");
        let (status, body) = post_orders(order).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("pg_catalog"));
    }

    #[tokio::test]
    async fn test_listed_schema_passes_the_allow_list() {
        let state = test_state();
        assert_eq!(
            state.schemas.resolve(Some("tienda")).unwrap().name(),
            "tienda"
        );
    }
}
