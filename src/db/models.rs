//! Row and write models for the catalog/quotation tables
//!
//! Read models decode straight from SQL rows (`FromRow`) and serialize
//! with the column names the wire contract exposes. Write models carry
//! already-validated input into the ingest transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Stored `referencia` is capped at this many characters.
pub const MAX_REFERENCE_LEN: usize = 60;

// =============================================================================
// Catalog (inv_items)
// =============================================================================

/// Catalog listing row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkuSummary {
    pub item: String,
}

/// Single catalog item detail
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkuDetail {
    pub id: i64,
    pub item: String,
    pub nombre: Option<String>,
}

// =============================================================================
// Quotations (cotizaciones / itemsxcotizacion)
// =============================================================================

/// Quotation listing row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteSummary {
    pub id: i64,
    pub fecha: Option<NaiveDate>,
    pub referencia: Option<String>,
    pub nombrecliente: Option<String>,
    pub email: Option<String>,
    pub idcotizacionweb: Option<i64>,
}

/// Quotation header as returned by the detail endpoint
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteHeader {
    pub id: i64,
    pub fecha: Option<NaiveDate>,
    pub referencia: Option<String>,
    pub nombrecliente: Option<String>,
    pub email: Option<String>,
    pub telefonos: Option<String>,
    pub idcotizacionweb: Option<i64>,
}

/// Line item row joined against the catalog for sku / product name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteItemRow {
    pub id: i64,
    pub iditem: Option<i64>,
    pub nombre: Option<String>,
    pub cantidad: f64,
    pub precioventa: f64,
    pub porcentajedescuento: f64,
    pub iva: f64,
    pub detalle: Option<String>,
    pub sku: Option<String>,
    pub nombre_producto: Option<String>,
}

/// Header plus items, the detail endpoint payload
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDetail {
    pub cotizacion: QuoteHeader,
    pub items: Vec<QuoteItemRow>,
}

// =============================================================================
// Order ingestion input
// =============================================================================

/// Validated order payload, ready for the ingest transaction.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub order_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub reference: Option<String>,
    pub items: Vec<NewQuoteItem>,
}

#[derive(Debug, Clone)]
pub struct NewQuoteItem {
    pub sku: String,
    pub name: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub discount: Decimal,
}

impl NewQuote {
    /// The `referencia` actually stored: the caller's reference when
    /// non-empty, otherwise `COT. PARA <customer>`, truncated to
    /// [`MAX_REFERENCE_LEN`] characters.
    pub fn effective_reference(&self) -> String {
        let base = match self.reference.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => format!("COT. PARA {}", self.customer_name),
        };
        base.chars().take(MAX_REFERENCE_LEN).collect()
    }

    /// Distinct trimmed SKUs in first-seen order, for the bulk catalog
    /// lookup. Whitespace-only SKUs collapse to the empty string and fail
    /// resolution downstream.
    pub fn distinct_skus(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            let sku = item.sku.trim();
            if !seen.iter().any(|s| s == sku) {
                seen.push(sku.to_string());
            }
        }
        seen
    }
}

/// Result of the order ingestion transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A new quotation was created with `items` line items.
    Created { id: i64, items: usize },
    /// The order id had already been ingested; `id` is the stored
    /// quotation id.
    AlreadyExists { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_quote(reference: Option<&str>, skus: &[&str]) -> NewQuote {
        NewQuote {
            order_id: 1001,
            customer_name: "Ana María".to_string(),
            customer_phone: String::new(),
            customer_email: "a@x.com".to_string(),
            reference: reference.map(str::to_string),
            items: skus
                .iter()
                .map(|sku| NewQuoteItem {
                    sku: sku.to_string(),
                    name: "Widget".to_string(),
                    qty: Decimal::ONE,
                    price: Decimal::TEN,
                    discount: Decimal::ZERO,
                })
                .collect(),
        }
    }

    #[test]
    fn test_reference_defaults_to_customer_name() {
        let quote = make_quote(None, &["ABC"]);
        assert_eq!(quote.effective_reference(), "COT. PARA Ana María");
    }

    #[test]
    fn test_empty_reference_falls_back() {
        let quote = make_quote(Some("   "), &["ABC"]);
        assert_eq!(quote.effective_reference(), "COT. PARA Ana María");
    }

    #[test]
    fn test_reference_is_truncated_to_60_chars() {
        let long = "R".repeat(80);
        let quote = make_quote(Some(&long), &["ABC"]);
        assert_eq!(quote.effective_reference().chars().count(), 60);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long = "ñ".repeat(70);
        let quote = make_quote(Some(&long), &["ABC"]);
        assert_eq!(quote.effective_reference(), "ñ".repeat(60));
    }

    #[test]
    fn test_distinct_skus_dedups_and_trims() {
        let quote = make_quote(None, &["ABC", " ABC ", "DEF", "ABC"]);
        assert_eq!(quote.distinct_skus(), vec!["ABC", "DEF"]);
    }

    #[test]
    fn test_distinct_skus_preserves_first_seen_order() {
        let quote = make_quote(None, &["ZZZ", "AAA", "MMM"]);
        assert_eq!(quote.distinct_skus(), vec!["ZZZ", "AAA", "MMM"]);
    }
}
