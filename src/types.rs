//! Type definitions for parsed CSV data

/// A parsed row: column strings in input order
pub type Row = Vec<String>;

/// A fully parsed CSV table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Header row, present only when parsed with `has_header(true)`
    pub headers: Option<Row>,
    /// Data rows in input order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get header row if available
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Get row at index (0-based, header excluded)
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume the table, returning the data rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Promote the first data row to the header row.
    /// No-op on an empty table.
    pub fn split_header(&mut self) {
        if !self.rows.is_empty() {
            self.headers = Some(self.rows.remove(0));
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Table {
            headers: None,
            rows,
        }
    }
}
