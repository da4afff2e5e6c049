//! Pagination utilities shared by service and transport layers.
//!
//! Page numbers are 1-based on the wire; `normalize` converts to the 0-based
//! index the persistence paginator expects. Default and maximum page size are
//! configuration values, so callers pass them in rather than relying on
//! hardcoded clamps.

use serde::Serialize;

/// Limits applied when normalizing a page request.
#[derive(Clone, Copy, Debug)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self { default_page_size: 25, max_page_size: 1000 }
    }
}

/// Raw pagination parameters as they arrive from the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageRequest {
    /// 1-based page index; `None` or 0 means the first page
    pub page_number: Option<u32>,
    /// items per page; `None` or 0 means the configured default
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Clamp to the configured limits and convert to `(zero_based_page, per_page)`.
    pub fn normalize(self, limits: PageLimits) -> (u64, u64) {
        let page = match self.page_number {
            Some(n) if n > 0 => n,
            _ => 1,
        };
        let per_page = match self.page_size {
            Some(s) if s > 0 => s.min(limits.max_page_size),
            _ => limits.default_page_size,
        };
        ((page - 1) as u64, per_page as u64)
    }
}

/// One slice of a listing plus total-count metadata.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    /// 1-based page index actually served
    pub page_number: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, zero_based_page: u64, per_page: u64) -> Self {
        Self { content, total_elements, page_number: zero_based_page + 1, page_size: per_page }
    }
}
