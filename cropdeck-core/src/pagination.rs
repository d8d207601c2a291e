//! Client-side pagination over a fully fetched result set.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page sizes offered by the list.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            page: 0,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Indices of the rows shown for a result set of `len` items:
    /// `[page * R, min((page + 1) * R, len))`, empty when past the end.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.rows_per_page).min(len);
        let end = start.saturating_add(self.rows_per_page).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.rows_per_page.max(1))
    }

    /// Changing the page size always returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    /// Advance to the next page size option, wrapping around.
    pub fn cycle_rows_per_page(&mut self) {
        let idx = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|r| *r == self.rows_per_page)
            .map(|i| (i + 1) % ROWS_PER_PAGE_OPTIONS.len())
            .unwrap_or(0);
        self.set_rows_per_page(ROWS_PER_PAGE_OPTIONS[idx]);
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page + 1 < self.page_count(len) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Pull the page back inside the result set after it shrank.
    pub fn clamp(&mut self, len: usize) {
        let pages = self.page_count(len);
        if pages == 0 {
            self.page = 0;
        } else if self.page >= pages {
            self.page = pages - 1;
        }
    }

    /// "start-end of total" label, 1-based.
    pub fn label(&self, len: usize) -> String {
        let range = self.range(len);
        if range.is_empty() {
            format!("0 of {}", len)
        } else {
            format!("{}-{} of {}", range.start + 1, range.end, len)
        }
    }
}
