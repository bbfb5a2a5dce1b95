use serde::{Deserialize, Serialize};

use crate::domain::repositories::CatalogError;

/// Page sizes offered by the listing
pub const ROWS_PER_PAGE_OPTIONS: [u32; 4] = [10, 20, 50, 100];
pub const DEFAULT_ROWS_PER_PAGE: u32 = 20;
pub const DEFAULT_PAGE: u32 = 1;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_rows_per_page() -> u32 {
    DEFAULT_ROWS_PER_PAGE
}

/// A 1-based page request over the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Rejects page 0 and page sizes outside [`ROWS_PER_PAGE_OPTIONS`]
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.page == 0 {
            return Err(CatalogError::InvalidQuery(
                "page numbers start at 1".to_string(),
            ));
        }
        if !ROWS_PER_PAGE_OPTIONS.contains(&self.rows_per_page) {
            return Err(CatalogError::InvalidQuery(format!(
                "rows_per_page must be one of {:?}",
                ROWS_PER_PAGE_OPTIONS
            )));
        }
        Ok(())
    }

    /// Zero-based offset of the first row on this page
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.rows_per_page)
    }

    pub fn limit(&self) -> u32 {
        self.rows_per_page
    }
}

/// "Showing first to last of total entries" summary for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page: u32,
    pub rows_per_page: u32,
    pub total_entries: u32,
    pub total_pages: u32,
    /// 1-based index of the first row shown, 0 when nothing is shown
    pub first: u32,
    /// 1-based index of the last row shown
    pub last: u32,
}

impl PageSummary {
    pub fn new(request: PageRequest, total_entries: u32) -> Self {
        let rows = request.rows_per_page.max(1);
        let total_pages = total_entries.div_ceil(rows);
        let last = request.page.saturating_mul(rows).min(total_entries);
        let first = if request.offset() < last {
            request.offset() + 1
        } else {
            0
        };

        Self {
            page: request.page,
            rows_per_page: request.rows_per_page,
            total_entries,
            total_pages,
            first,
            last,
        }
    }
}
