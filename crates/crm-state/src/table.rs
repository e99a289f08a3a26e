//! Table view state: search filter, sort state and paging over a record table.

use crm_model::Record;

use crate::sort::SortState;

/// Default page size when none is configured.
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// UI state of one record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    search: String,
    sort: SortState,
    page: usize,
    rows_per_page: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self::with_rows_per_page(DEFAULT_ROWS_PER_PAGE)
    }
}

/// The visible slice of a table after filtering, sorting and paging.
#[derive(Debug, Clone)]
pub struct TablePage<'a, R> {
    pub rows: Vec<&'a R>,
    /// Rows matching the search, across all pages.
    pub total_rows: usize,
    /// Current page (0-indexed), clamped to the available pages.
    pub page: usize,
    pub page_count: usize,
}

impl<R> TablePage<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableView {
    /// Create with a custom rows per page value (minimum 1).
    pub fn with_rows_per_page(rows: usize) -> Self {
        Self {
            search: String::new(),
            sort: SortState::new(),
            page: 0,
            rows_per_page: rows.max(1),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Header click. Returns to the first page.
    pub fn click_header(&mut self, key: &str) {
        self.sort.set_sort(key);
        self.page = 0;
    }

    /// Replace the search query. Returns to the first page.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.trim().to_string();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self, total_rows: usize) {
        let last = page_count(total_rows, self.rows_per_page) - 1;
        self.page = self.page.saturating_add(1).min(last);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// All rows matching the search, in display order, without paging.
    pub fn filtered<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<&R> = records
            .iter()
            .filter(|record| record.matches_search(&needle))
            .collect();
        self.sort.sort_rows(&mut rows);
        rows
    }

    /// The current page of `records`.
    pub fn project<'a, R: Record>(&self, records: &'a [R]) -> TablePage<'a, R> {
        let rows = self.filtered(records);
        let total_rows = rows.len();
        let page_count = page_count(total_rows, self.rows_per_page);
        let page = self.page.min(page_count.saturating_sub(1));
        let rows = rows
            .into_iter()
            .skip(page * self.rows_per_page)
            .take(self.rows_per_page)
            .collect();
        TablePage {
            rows,
            total_rows,
            page,
            page_count,
        }
    }
}

fn page_count(total_rows: usize, rows_per_page: usize) -> usize {
    total_rows.div_ceil(rows_per_page).max(1)
}
