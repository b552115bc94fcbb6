//! Quotation repository — listings, detail, and the order ingestion
//! transaction.

use std::collections::HashMap;

use sqlx::PgPool;

use super::{RepoError, RepoResult};
use crate::db::models::{
    IngestOutcome, NewQuote, QuoteDetail, QuoteHeader, QuoteItemRow, QuoteSummary,
};
use crate::db::schema::SchemaRef;

/// `detalle` tag stamped on every line item created by the web order path.
const ITEM_DETAIL_TAG: &str = "COLECCION WOO";

#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated quotation listing. `search` matches reference, customer
    /// name, email and the web order id; when the term parses as an
    /// integer it also matches the internal id.
    pub async fn search(
        &self,
        schema: &SchemaRef,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<QuoteSummary>, i64)> {
        let table = schema.table("cotizaciones");
        let like = search.map(|s| format!("%{s}%"));
        let id_match: Option<i64> = search.and_then(|s| s.parse().ok());

        let where_sql = "($1::text IS NULL \
             OR c.referencia ILIKE $1 \
             OR c.nombrecliente ILIKE $1 \
             OR c.email ILIKE $1 \
             OR CAST(c.idcotizacionweb AS TEXT) ILIKE $1 \
             OR ($2::bigint IS NOT NULL AND c.id = $2))";

        let count_sql = format!("SELECT COUNT(*)::bigint FROM {table} c WHERE {where_sql}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&like)
            .bind(id_match)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT c.id::bigint AS id, c.fecha, c.referencia, c.nombrecliente, c.email, \
                    c.idcotizacionweb::bigint AS idcotizacionweb \
             FROM {table} c \
             WHERE {where_sql} \
             ORDER BY c.fecha DESC, c.id DESC \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, QuoteSummary>(&list_sql)
            .bind(&like)
            .bind(id_match)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Quotation detail by internal id or web order id (raw path segment).
    /// Returns the header plus its line items joined against the catalog.
    pub async fn find_detail(
        &self,
        schema: &SchemaRef,
        raw_id: &str,
    ) -> RepoResult<Option<QuoteDetail>> {
        let id_match: Option<i64> = raw_id.parse().ok();

        let header_sql = format!(
            "SELECT c.id::bigint AS id, c.fecha, c.referencia, c.nombrecliente, c.email, \
                    c.telefonos, c.idcotizacionweb::bigint AS idcotizacionweb \
             FROM {} c \
             WHERE ($1::bigint IS NOT NULL AND c.id = $1) \
                OR CAST(c.idcotizacionweb AS TEXT) = $2 \
             ORDER BY c.fecha DESC \
             LIMIT 1",
            schema.table("cotizaciones")
        );
        let header: Option<QuoteHeader> = sqlx::query_as(&header_sql)
            .bind(id_match)
            .bind(raw_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(cotizacion) = header else {
            return Ok(None);
        };

        let items_sql = format!(
            "SELECT ixc.id::bigint AS id, ixc.iditem::bigint AS iditem, ixc.nombre, \
                    ixc.cantidad::float8 AS cantidad, ixc.precioventa::float8 AS precioventa, \
                    ixc.porcentajedescuento::float8 AS porcentajedescuento, \
                    ixc.iva::float8 AS iva, ixc.detalle, \
                    ii.item AS sku, ii.nombre AS nombre_producto \
             FROM {} ixc \
             LEFT JOIN {} ii ON ii.id = ixc.iditem \
             WHERE ixc.idcotizacion = $1 \
             ORDER BY ixc.id ASC",
            schema.table("itemsxcotizacion"),
            schema.table("inv_items")
        );
        let items: Vec<QuoteItemRow> = sqlx::query_as(&items_sql)
            .bind(cotizacion.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(QuoteDetail { cotizacion, items }))
    }

    /// Runs the whole order → quotation write path inside one transaction:
    ///
    /// 1. idempotency check on `idcotizacionweb`
    /// 2. bulk SKU resolution against the catalog
    /// 3. header insert
    /// 4. one line-item insert per input item, in input order
    /// 5. commit
    ///
    /// The transaction rolls back on drop, so every early return — missing
    /// SKUs, query failure, constraint violation — leaves no partial
    /// writes, and the pooled connection is released on every exit path.
    pub async fn ingest_order(
        &self,
        schema: &SchemaRef,
        order: &NewQuote,
    ) -> RepoResult<IngestOutcome> {
        let cotizaciones = schema.table("cotizaciones");
        let items_table = schema.table("itemsxcotizacion");
        let inv_items = schema.table("inv_items");

        let mut tx = self.pool.begin().await?;

        // 1. Idempotency: an already-seen web order id resolves to the
        //    stored quotation without writing anything.
        let existing_sql =
            format!("SELECT id::bigint FROM {cotizaciones} WHERE idcotizacionweb = $1 LIMIT 1");
        let existing: Option<i64> = sqlx::query_scalar(&existing_sql)
            .bind(order.order_id)
            .fetch_optional(&mut *tx)
            .await?;
        if let Some(id) = existing {
            tx.rollback().await?;
            return Ok(IngestOutcome::AlreadyExists { id });
        }

        // 2. Resolve every referenced SKU in one round-trip.
        let skus = order.distinct_skus();
        let resolve_sql =
            format!("SELECT id::bigint AS id, item FROM {inv_items} WHERE item = ANY($1)");
        let resolved_rows: Vec<(i64, String)> = sqlx::query_as(&resolve_sql)
            .bind(&skus)
            .fetch_all(&mut *tx)
            .await?;
        let resolved: HashMap<String, i64> = resolved_rows
            .into_iter()
            .map(|(id, item)| (item, id))
            .collect();

        let missing: Vec<String> = skus
            .iter()
            .filter(|sku| !resolved.contains_key(*sku))
            .cloned()
            .collect();
        if !missing.is_empty() {
            tx.rollback().await?;
            return Err(RepoError::SkusNotFound {
                schema: schema.name().to_string(),
                missing,
            });
        }

        // 3. Header insert. Business fields this path does not model are
        //    written as the fixed values the quotation workflow expects.
        let header_sql = format!(
            "INSERT INTO {cotizaciones} ( \
                fecha, referencia, tipoproceso, idusuario, tipocliente, idcliente, \
                idciudadinstalacion, descuento, anticipo, estado, causalnegacion, \
                especial, idoc, embalaje, version, idproyecto, iva, idsolicitud, \
                vrservicios, nombrecliente, telefonos, email, idcotizacionweb \
             ) VALUES ( \
                CURRENT_DATE, $1, 0, 1, 0, 0, \
                0, 0, 0, 0, 0, \
                FALSE, 0, 0, 1, 0, 19, 0, \
                0, $2, $3, $4, $5 \
             ) RETURNING id::bigint"
        );
        let inserted: Result<i64, sqlx::Error> = sqlx::query_scalar(&header_sql)
            .bind(order.effective_reference())
            .bind(&order.customer_name)
            .bind(&order.customer_phone)
            .bind(&order.customer_email)
            .bind(order.order_id)
            .fetch_one(&mut *tx)
            .await;

        let idcotizacion = match inserted {
            Ok(id) => id,
            Err(err) if is_unique_violation(&err) => {
                // Lost the race against a concurrent identical submission:
                // the uniqueness of idcotizacionweb is the second
                // idempotency signal. Re-query and resolve as idempotent.
                tx.rollback().await?;
                let id: Option<i64> = sqlx::query_scalar(&existing_sql)
                    .bind(order.order_id)
                    .fetch_optional(&self.pool)
                    .await?;
                return match id {
                    Some(id) => Ok(IngestOutcome::AlreadyExists { id }),
                    None => Err(err.into()),
                };
            }
            Err(err) => return Err(err.into()),
        };

        // 4. Line-item inserts, in input order.
        let item_sql = format!(
            "INSERT INTO {items_table} ( \
                idcotizacion, detalle, iditem, nombre, cantidad, precioventa, iva, \
                especial, espedido, porcentajedescuento \
             ) VALUES ( \
                $1, $2, $3, $4, $5, $6, 19, \
                FALSE, FALSE, $7 \
             )"
        );
        for item in &order.items {
            let iditem = resolved.get(item.sku.trim()).copied().ok_or_else(|| {
                RepoError::Database(format!("SKU sin resolver en la transacción: {}", item.sku))
            })?;
            sqlx::query(&item_sql)
                .bind(idcotizacion)
                .bind(ITEM_DETAIL_TAG)
                .bind(iditem)
                .bind(&item.name)
                .bind(item.qty)
                .bind(item.price)
                .bind(item.discount)
                .execute(&mut *tx)
                .await?;
        }

        // 5. Commit.
        tx.commit().await?;

        Ok(IngestOutcome::Created {
            id: idcotizacion,
            items: order.items.len(),
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
