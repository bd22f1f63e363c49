use std::sync::Arc;
use tracing::debug;

use crate::column_manager::{ColumnHeader, ColumnManager, ColumnRules};
use crate::data::paginator::Paginator;
use crate::data::record::Record;
use crate::data::value_format::ValueFormatter;
use crate::search_filter::SearchFilter;

pub const NO_ITEMS_TEXT: &str = "No items found";

/// A view over the loaded records that can search, paginate, and project
/// columns without modifying the underlying data
#[derive(Debug, Clone)]
pub struct DataView {
    /// The underlying immutable records
    source: Arc<Vec<Record>>,

    /// Display columns, resolved once from the full record set
    columns: Vec<ColumnHeader>,
    column_keys: Vec<String>,

    /// Indices into `source` matching the current search, ascending
    filtered_rows: Vec<usize>,

    search_query: String,
    paginator: Paginator,
    formatter: ValueFormatter,
}

impl DataView {
    /// Create a view showing all records on page 1
    pub fn new(
        source: Arc<Vec<Record>>,
        rules: &ColumnRules,
        page_size: usize,
        formatter: ValueFormatter,
    ) -> Self {
        let columns = ColumnManager::resolve_columns(&source, rules);
        let column_keys = columns.iter().map(|c| c.key.clone()).collect();
        let filtered_rows = (0..source.len()).collect();

        Self {
            source,
            columns,
            column_keys,
            filtered_rows,
            search_query: String::new(),
            paginator: Paginator::new(page_size),
            formatter,
        }
    }

    /// Replace the filtered rows with the records matching `query`.
    /// Always returns to page 1, also when the query is blank.
    pub fn search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.filtered_rows =
            SearchFilter::filter_rows(&self.source, &self.column_keys, query, &self.formatter);
        self.paginator.first();

        debug!(
            target: "search",
            "Search '{}' matched {} of {} records",
            query,
            self.filtered_rows.len(),
            self.source.len()
        );
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.paginator.set_page_size(page_size);
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next(self.filtered_rows.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    pub fn first_page(&mut self) -> bool {
        self.paginator.first()
    }

    pub fn last_page(&mut self) -> bool {
        self.paginator.last(self.filtered_rows.len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.paginator.go_to(page, self.filtered_rows.len())
    }

    pub fn columns(&self) -> &[ColumnHeader] {
        &self.columns
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Number of records matching the current search
    pub fn row_count(&self) -> usize {
        self.filtered_rows.len()
    }

    pub fn total_count(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_rows.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn last_page_number(&self) -> usize {
        self.paginator.last_page(self.filtered_rows.len())
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn formatter(&self) -> &ValueFormatter {
        &self.formatter
    }

    /// Indices into the source of the rows matching the current search
    pub fn filtered_row_indices(&self) -> &[usize] {
        &self.filtered_rows
    }

    /// Records on the current page
    pub fn page_records(&self) -> Vec<&Record> {
        let window = self.paginator.window(self.filtered_rows.len());
        self.filtered_rows[window]
            .iter()
            .map(|&idx| &self.source[idx])
            .collect()
    }

    /// Formatted cells of the current page, in column order
    pub fn page_cells(&self) -> Vec<Vec<String>> {
        self.page_records()
            .into_iter()
            .map(|record| {
                self.column_keys
                    .iter()
                    .map(|key| self.formatter.format_field(record, key))
                    .collect()
            })
            .collect()
    }

    pub fn items_shown_text(&self) -> String {
        match self.paginator.items_shown(self.filtered_rows.len()) {
            Some((first, last)) => format!("Showing items {} - {}", first, last),
            None => NO_ITEMS_TEXT.to_string(),
        }
    }
}
