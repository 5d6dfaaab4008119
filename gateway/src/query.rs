use storecast_common::pager::RowRange;

/// Ordering clause for a table read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A read against one remote table: equality filters, an optional order and
/// an optional row window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    filters: Vec<(String, String)>,
    order: Option<Order>,
    range: Option<RowRange>,
}

impl TableQuery {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            range: None,
        }
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn range(mut self, range: RowRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn row_range(&self) -> Option<RowRange> {
        self.range
    }

    /// Query-string pairs in the PostgREST dialect.
    ///
    /// `select=*`, then `col=eq.value` per filter, `order=col.asc|desc`, and
    /// the window as `offset` / `limit`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        if let Some(range) = self.range {
            params.push(("offset".to_string(), range.from.to_string()));
            params.push(("limit".to_string(), range.width().to_string()));
        }
        params
    }

    /// Same query stripped of order and window, for an exact count.
    pub fn for_count(&self) -> Self {
        Self {
            table: self.table.clone(),
            filters: self.filters.clone(),
            order: None,
            range: None,
        }
    }
}

/// Total from a `Content-Range` header (`0-9/25`, `*/25`).
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}
