//! Catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{SkuDetail, SkuSummary};
use crate::db::repository::CatalogRepository;
use crate::utils::types::{DataResponse, PageQuery, Paginated, Pagination, SchemaQuery};
use crate::utils::validation::{MAX_SKU_SEARCH_LEN, normalize_sku, search_term};
use crate::utils::{AppError, AppResult};

/// GET /api/skus - paginated catalog listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<SkuSummary>>> {
    query.validate()?;
    let schema = state.schemas.resolve(query.schema.as_deref())?;
    let search = search_term(query.search.as_deref(), MAX_SKU_SEARCH_LEN)?;

    let repo = CatalogRepository::new(state.pool.clone());
    let (data, total) = repo
        .search(&schema, search.as_deref(), query.limit(), query.offset())
        .await?;

    Ok(Json(Paginated {
        data,
        pagination: Pagination::new(query.page, query.page_size, total),
    }))
}

/// GET /api/sku/{sku} - single catalog item
pub async fn detail(
    State(state): State<ServerState>,
    Path(sku): Path<String>,
    Query(query): Query<SchemaQuery>,
) -> AppResult<Json<DataResponse<SkuDetail>>> {
    let sku = normalize_sku(&sku)?;
    let schema = state.schemas.resolve(query.schema.as_deref())?;

    let repo = CatalogRepository::new(state.pool.clone());
    let data = repo
        .find_by_sku(&schema, &sku)
        .await?
        .ok_or_else(|| AppError::not_found("SKU no encontrado"))?;

    Ok(Json(DataResponse { data }))
}
