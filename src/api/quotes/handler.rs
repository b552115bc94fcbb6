//! Quotation read handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{QuoteDetail, QuoteSummary};
use crate::db::repository::QuoteRepository;
use crate::utils::types::{DataResponse, PageQuery, Paginated, Pagination, SchemaQuery};
use crate::utils::validation::{MAX_QUOTE_SEARCH_LEN, search_term};
use crate::utils::{AppError, AppResult};

/// GET /api/cotizaciones - paginated quotation listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<QuoteSummary>>> {
    query.validate()?;
    let schema = state.schemas.resolve(query.schema.as_deref())?;
    let search = search_term(query.search.as_deref(), MAX_QUOTE_SEARCH_LEN)?;

    let repo = QuoteRepository::new(state.pool.clone());
    let (data, total) = repo
        .search(&schema, search.as_deref(), query.limit(), query.offset())
        .await?;

    Ok(Json(Paginated {
        data,
        pagination: Pagination::new(query.page, query.page_size, total),
    }))
}

/// GET /api/cotizaciones/{id} - quotation detail by internal or web
/// order id
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<SchemaQuery>,
) -> AppResult<Json<DataResponse<QuoteDetail>>> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(AppError::validation("id es obligatorio"));
    }
    let schema = state.schemas.resolve(query.schema.as_deref())?;

    let repo = QuoteRepository::new(state.pool.clone());
    let data = repo
        .find_detail(&schema, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Cotización no encontrada"))?;

    Ok(Json(DataResponse { data }))
}
