#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Result, ensure};

/// An in-memory tabular structure: one header row plus string-valued cells.
///
/// This is the shape both exports are loaded into. Cells are kept verbatim,
/// with no trimming: the gradebook's sentinel row is only recognizable with
/// its leading spaces intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names, exactly as they appear in the file.
    headers: Vec<String>,
    /// Data rows, each as wide as `headers`.
    rows:    Vec<Vec<String>>,
}

impl Table {
    /// Creates a table, checking that every row is as wide as the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == headers.len(),
                "Row {} has {} cells, expected {} (one per column)",
                i + 1,
                row.len(),
                headers.len()
            );
        }
        Ok(Self { headers, rows })
    }

    /// The column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The name of column `col`.
    pub fn header(&self, col: usize) -> &str {
        &self.headers[col]
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of the column named exactly `name`, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of every column whose name starts with `prefix`.
    ///
    /// Canvas appends an id to assignment column names ("HW1 (12345)"), so
    /// destination columns are located by prefix; the caller decides what
    /// zero or multiple matches mean.
    pub fn columns_with_prefix(&self, prefix: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }

    /// The cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Overwrites the cell at (`row`, `col`).
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        self.rows[row][col] = value;
    }

    /// Iterates the values of column `col`, top to bottom.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[col].as_str())
    }
}
