/// Rows shown per page of the message list.
pub const PAGE_SIZE: u64 = 10;

/// Inclusive, zero-based row window (`from..=to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// Number of rows the window spans.
    pub fn width(&self) -> u64 {
        self.to + 1 - self.from
    }
}

/// One-based page position over a list whose total length is known.
///
/// The page number is never adjusted when the total changes; a page past the
/// end simply yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u64,
    page_size: u64,
    total_count: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: u64) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `ceil(total / page_size)`; zero when there are no rows.
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size)
    }

    /// Row window for the current page.
    pub fn range(&self) -> RowRange {
        let from = (self.page - 1) * self.page_size;
        RowRange {
            from,
            to: from + self.page_size - 1,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether the current page lies beyond the last one (e.g. after a delete).
    pub fn is_past_end(&self) -> bool {
        self.page > self.total_pages().max(1)
    }

    pub fn with_total(mut self, total_count: u64) -> Self {
        self.total_count = total_count;
        self
    }

    pub fn go_to(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn previous(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.go_to(page)
    }

    pub fn next(self) -> Self {
        if self.has_next() {
            let page = self.page + 1;
            self.go_to(page)
        } else {
            self
        }
    }
}
