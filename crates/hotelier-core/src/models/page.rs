//! Server-side pagination for admin tables.

/// Rows-per-page choices offered by the admin tables.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 25, 100];

/// Default rows per page.
const DEFAULT_PAGE_SIZE: u32 = 5;

/// One page of a listing plus the server's total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> ListPage<T> {
    /// Patch rows in place, e.g. after a toggle the server confirmed.
    /// Returns how many rows were updated.
    pub fn replace_where<P, F>(&mut self, mut matches: P, mut update: F) -> usize
    where
        P: FnMut(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut updated = 0;
        for item in self.items.iter_mut().filter(|item| matches(item)) {
            update(item);
            updated += 1;
        }
        updated
    }
}

/// Page cursor for a table backed by `pageIndex`/`pageSize` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
        }
    }
}

impl Pagination {
    /// Index of the last page, 0 when the table is empty.
    pub fn last_page(&self) -> u32 {
        if self.total_count == 0 || self.page_size == 0 {
            return 0;
        }
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.last_page()
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) -> bool {
        let moved = self.page_index != 0;
        self.page_index = 0;
        moved
    }

    pub fn last(&mut self) -> bool {
        let last = self.last_page();
        let moved = self.page_index != last;
        self.page_index = last;
        moved
    }

    /// Change rows per page; always returns to the first page.
    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size.max(1);
        self.page_index = 0;
    }

    /// Step to the next entry of [`PAGE_SIZE_OPTIONS`] (wrapping around).
    pub fn cycle_page_size(&mut self) {
        let idx = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&s| s == self.page_size)
            .map(|i| (i + 1) % PAGE_SIZE_OPTIONS.len())
            .unwrap_or(0);
        self.set_page_size(PAGE_SIZE_OPTIONS[idx]);
    }

    /// Update the total after a fetch, pulling the cursor back if the
    /// current page no longer exists (e.g. after deleting its last row).
    pub fn set_total(&mut self, total: u64) {
        self.total_count = total;
        if self.page_index > self.last_page() {
            self.page_index = self.last_page();
        }
    }

    /// 1-based row number shown in the `#` column.
    pub fn row_number(&self, row: usize) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size) + row as u64 + 1
    }

    /// "1-5 of 12" style range label.
    pub fn range_label(&self) -> String {
        if self.total_count == 0 {
            return "0 of 0".to_string();
        }
        let start = u64::from(self.page_index) * u64::from(self.page_size) + 1;
        let end = (start + u64::from(self.page_size) - 1).min(self.total_count);
        format!("{}-{} of {}", start, end, self.total_count)
    }
}
