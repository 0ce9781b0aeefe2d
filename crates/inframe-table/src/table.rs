//! Searchable record table

use std::borrow::Cow;

use crate::cell::{CellValue, RenderedCell};
use crate::column::ColumnSpec;
use crate::filter::{filter_records, truncate_words};
use crate::record::Record;

/// Default number of words shown before text is truncated
pub const DEFAULT_WORD_LIMIT: usize = 20;

/// Text shown for a missing cell
pub const PLACEHOLDER: &str = "-";

/// Receiver of row activations
pub trait Navigator {
    /// Go to `route`
    fn navigate(&mut self, route: &str);
}

/// Route for a record's detail view
pub fn detail_route(base_url: &str, id: &str) -> String {
    format!("{}/{id}", base_url.trim_end_matches('/'))
}

/// Table state: schema, the last supplied records and the filtered view
#[derive(Debug, Clone)]
pub struct RecordTable {
    columns: Vec<ColumnSpec>,
    base_url: String,
    word_limit: usize,
    records: Vec<Record>,
    search: String,
    visible: Vec<usize>,
}

impl RecordTable {
    /// Create an empty table
    pub fn new(columns: Vec<ColumnSpec>, base_url: impl Into<String>) -> Self {
        debug_assert!(!columns.is_empty(), "record table needs at least one column");
        Self {
            columns,
            base_url: base_url.into(),
            word_limit: DEFAULT_WORD_LIMIT,
            records: Vec::new(),
            search: String::new(),
            visible: Vec::new(),
        }
    }

    /// Override the truncation word limit
    #[must_use]
    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    /// Column schema
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Base route for row activation
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current search text
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Every record, unfiltered
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replace the record list and recompute the view
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refilter();
    }

    /// Replace the search text and recompute the view
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = filter_records(&self.records, &self.search);
        tracing::trace!(
            total = self.records.len(),
            visible = self.visible.len(),
            search = %self.search,
            "record table refiltered"
        );
    }

    /// Number of rows in the filtered view
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Row `row` of the filtered view
    pub fn visible(&self, row: usize) -> Option<&Record> {
        self.visible.get(row).map(|&i| &self.records[i])
    }

    /// Iterate the filtered view in order
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.visible.iter().map(|&i| &self.records[i])
    }

    /// Apply the rendering policy to one cell
    pub fn render_cell<'a>(&self, record: &'a Record, column: &ColumnSpec) -> RenderedCell<'a> {
        match record.get(&column.key) {
            None => RenderedCell::Placeholder,
            Some(CellValue::Image(url)) => RenderedCell::Thumbnail(url),
            Some(CellValue::Text(value)) => {
                RenderedCell::Text(truncate_words(value, self.word_limit))
            }
            Some(cell @ CellValue::Scalar(_)) => {
                let text = match cell.search_text() {
                    Cow::Borrowed(s) => truncate_words(s, self.word_limit),
                    Cow::Owned(s) => Cow::Owned(truncate_words(&s, self.word_limit).into_owned()),
                };
                RenderedCell::Text(text)
            }
        }
    }

    /// Activate row `row` of the filtered view
    ///
    /// Navigates to `{base_url}/{id}` and returns the route, or `None` when
    /// the row does not exist.
    pub fn activate(&self, row: usize, navigator: &mut impl Navigator) -> Option<String> {
        let record = self.visible(row)?;
        let route = detail_route(&self.base_url, record.id());
        tracing::debug!(route = %route, "row activated");
        navigator.navigate(&route);
        Some(route)
    }
}
