// src/data.rs
//
// In-memory shapes shared by the scraper, the store and the viewer.
//
// - SnapshotRow: one captured listing entry, written once, never edited.
// - DataSet:     a CSV table (header + string cells). Column types are not
//                stored; they are inferred where needed (see `is_numeric_column`).

use crate::config::consts::HEADERS;

/// One ranked entry as captured from the listing page.
/// Price and change are kept exactly as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotRow {
    pub name: String,
    pub price: String,
    pub change: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time of capture.
    pub timestamp: String,
}

impl SnapshotRow {
    /// Cells in file column order: Name, Price, Change, Timestamp.
    pub fn to_record(&self) -> [&str; 4] {
        [&self.name, &self.price, &self.change, &self.timestamp]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_snapshot_rows(rows: &[SnapshotRow]) -> Self {
        Self {
            headers: HEADERS.iter().map(|h| s!(*h)).collect(),
            rows: rows
                .iter()
                .map(|r| r.to_record().iter().map(|c| s!(*c)).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize { self.rows.len() }
    pub fn header_count(&self) -> usize { self.headers.len() }

    /// Exact header match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// ASCII case-insensitive header match.
    pub fn column_index_ci(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// A column is numeric when it has at least one non-empty cell and every
    /// non-empty cell parses as a float.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            let cell = row.get(col).map(|c| c.trim()).unwrap_or("");
            if cell.is_empty() { continue; }
            if cell.parse::<f64>().is_err() { return false; }
            seen = true;
        }
        seen
    }

    /// `is_numeric_column` for every column, in header order.
    pub fn numeric_columns(&self) -> Vec<bool> {
        (0..self.header_count()).map(|c| self.is_numeric_column(c)).collect()
    }
}
