//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

impl PaginationConfig {
    /// Resolve the optional request parameters into a concrete page window.
    ///
    /// Pages are 1-based. Zero or missing values fall back to the defaults.
    pub fn resolve(&self, page: Option<u64>, per_page: Option<u64>) -> PageWindow {
        PageWindow {
            page: page.filter(|&page| page >= 1).unwrap_or(self.default_page),
            per_page: per_page
                .filter(|&per_page| per_page >= 1)
                .unwrap_or(self.default_page_size),
        }
    }
}

/// A concrete window into a listing: which page, and how many rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The 1-based page number.
    pub page: u64,
    /// The number of rows per page.
    pub per_page: u64,
}

impl PageWindow {
    /// The number of rows to skip before this page starts.
    ///
    /// Saturates at `u64::MAX` so absurdly large page numbers request rows
    /// past the end of the data rather than wrapping around to the start.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}
