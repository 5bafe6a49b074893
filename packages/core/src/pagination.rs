// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Lenient page/limit coercion and the {data, total, page, limit, totalPages} envelope

use serde::{Deserialize, Deserializer, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Accepts an integer or a numeric string; anything unparsable becomes `None`
/// so callers fall back to their defaults instead of rejecting the request.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(Raw::Float(_)) => None,
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        None => None,
    })
}

/// Query parameters for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page: i64,
    limit: i64,
}

impl PaginationParams {
    /// Create new pagination params with defaults
    pub fn new() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create pagination params with custom values, normalized
    pub fn with_page_and_limit(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(MIN_PAGE),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build params from optional raw query values, applying defaults
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::with_page_and_limit(
            page.unwrap_or(MIN_PAGE),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Get the current page number
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Number of pages needed to hold `total` items
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    /// The data items for the current page
    pub data: Vec<T>,

    /// Total number of items across all pages
    pub total: i64,

    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub limit: i64,

    /// Total number of pages
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Create a new page from one slice of results and the full count
    pub fn new(data: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            data,
            total,
            page: params.page(),
            limit: params.limit(),
            total_pages: params.total_pages(total),
        }
    }
}
