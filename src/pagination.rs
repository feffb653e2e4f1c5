//! Page addressing and the paged result envelope returned by listing routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Offset-addressed slice request. `page_index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Number of matching rows skipped before this page starts.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Number of items a page holds given the total size of the matching set.
    pub fn expected_len(&self, total_row: usize) -> usize {
        total_row.saturating_sub(self.offset()).min(self.page_size)
    }
}

/// A page of items together with the size of the whole filtered set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    /// Number of rows matching the filter before slicing.
    pub total_row: usize,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page: PageRequest, total_row: usize) -> Self {
        Self {
            items,
            page_index: page.page_index,
            page_size: page.page_size,
            total_row,
        }
    }
}
