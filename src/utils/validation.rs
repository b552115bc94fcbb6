//! Input validation helpers
//!
//! Centralized length limits and normalization for path/query
//! parameters. Payload bodies validate through `validator` derives; these
//! helpers cover the places a derive cannot reach.

use crate::utils::AppError;

// ── Length limits ───────────────────────────────────────────────────

/// SKU path parameter
pub const MAX_SKU_LEN: usize = 64;

/// `search` term on the SKU listing
pub const MAX_SKU_SEARCH_LEN: usize = 100;

/// `search` term on the quotation listing
pub const MAX_QUOTE_SEARCH_LEN: usize = 120;

// ── Normalization ───────────────────────────────────────────────────

/// Normalize a SKU path parameter: trim, bound the length, restrict the
/// charset and upper-case for the case-insensitive catalog lookup.
pub fn normalize_sku(raw: &str) -> Result<String, AppError> {
    let sku = raw.trim();
    if sku.is_empty() || sku.len() > MAX_SKU_LEN {
        return Err(AppError::validation("SKU inválido"));
    }
    if !sku.chars().all(is_sku_char) {
        return Err(AppError::validation("SKU inválido"));
    }
    Ok(sku.to_uppercase())
}

fn is_sku_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ' ')
}

/// Trim an optional search term, dropping empty results and rejecting
/// over-long input.
pub fn search_term(raw: Option<&str>, max_len: usize) -> Result<Option<String>, AppError> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(s) if s.len() > max_len => Err(AppError::validation(format!(
            "search is too long ({} chars, max {max_len})",
            s.len()
        ))),
        Some(s) => Ok(Some(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sku_trims_and_uppercases() {
        assert_eq!(normalize_sku("  abc-12.f/g ").unwrap(), "ABC-12.F/G");
    }

    #[test]
    fn test_normalize_sku_rejects_empty() {
        assert!(normalize_sku("   ").is_err());
    }

    #[test]
    fn test_normalize_sku_rejects_bad_chars() {
        assert!(normalize_sku("abc;DROP").is_err());
        assert!(normalize_sku("abc%").is_err());
    }

    #[test]
    fn test_normalize_sku_rejects_over_64_chars() {
        let long = "A".repeat(65);
        assert!(normalize_sku(&long).is_err());
    }

    #[test]
    fn test_search_term_drops_empty() {
        assert_eq!(search_term(Some("   "), 100).unwrap(), None);
        assert_eq!(search_term(None, 100).unwrap(), None);
    }

    #[test]
    fn test_search_term_trims() {
        assert_eq!(
            search_term(Some(" widget "), 100).unwrap().as_deref(),
            Some("widget")
        );
    }

    #[test]
    fn test_search_term_rejects_over_limit() {
        let long = "x".repeat(121);
        assert!(search_term(Some(&long), 120).is_err());
    }
}
