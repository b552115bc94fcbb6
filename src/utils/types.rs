//! Shared Types
//!
//! Pagination and response envelopes common to the read endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination query parameters shared by the listing endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,

    #[serde(default = "default_page_size", rename = "pageSize")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,

    pub schema: Option<String>,

    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            schema: None,
            search: None,
        }
    }
}

impl PageQuery {
    /// Calculate offset for SQL queries
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Get limit for SQL queries
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// Query string carrying only the optional schema selector.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaQuery {
    pub schema: Option<String>,
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: i64) -> Self {
        let size = i64::from(page_size);
        let total_pages = std::cmp::max(1, (total + size - 1) / size);
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

/// Listing response: a page of rows plus its pagination block.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Detail response envelope, `{ "data": … }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_still_has_one_page() {
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 20, 41).total_pages, 3);
        assert_eq!(Pagination::new(1, 20, 40).total_pages, 2);
    }

    #[test]
    fn test_offset_and_limit() {
        let query = PageQuery {
            page: 3,
            page_size: 25,
            ..PageQuery::default()
        };
        assert_eq!(query.offset(), 50);
        assert_eq!(query.limit(), 25);
    }

    #[test]
    fn test_page_size_out_of_range_fails_validation() {
        let query = PageQuery {
            page_size: 500,
            ..PageQuery::default()
        };
        assert!(query.validate().is_err());

        let query = PageQuery {
            page: 0,
            ..PageQuery::default()
        };
        assert!(query.validate().is_err());
    }
}
