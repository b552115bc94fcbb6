//! Catalog repository — read-only access to `inv_items`

use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::{SkuDetail, SkuSummary};
use crate::db::schema::SchemaRef;

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated SKU listing, optionally filtered by a case-insensitive
    /// substring match on `item`. Returns the page plus the total count
    /// over the same filter.
    pub async fn search(
        &self,
        schema: &SchemaRef,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<SkuSummary>, i64)> {
        let table = schema.table("inv_items");
        let like = search.map(|s| format!("%{s}%"));

        let count_sql =
            format!("SELECT COUNT(*)::bigint FROM {table} WHERE $1::text IS NULL OR item ILIKE $1");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&like)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT item FROM {table} \
             WHERE $1::text IS NULL OR item ILIKE $1 \
             ORDER BY item ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, SkuSummary>(&list_sql)
            .bind(&like)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Case-insensitive single SKU lookup. The caller passes an
    /// upper-cased SKU; matching is `UPPER(item) = $1`.
    pub async fn find_by_sku(
        &self,
        schema: &SchemaRef,
        sku: &str,
    ) -> RepoResult<Option<SkuDetail>> {
        let sql = format!(
            "SELECT id::bigint AS id, item, nombre FROM {} WHERE UPPER(item) = $1 LIMIT 1",
            schema.table("inv_items")
        );
        Ok(sqlx::query_as::<_, SkuDetail>(&sql)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?)
    }
}
