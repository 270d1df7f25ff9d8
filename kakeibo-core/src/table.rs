//! Untyped tabular data as read from a CSV export.
//!
//! A [`Table`] is an ordered list of header names plus rows of text cells.
//! Every row holds exactly one cell per header; an empty string is the
//! "missing" value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells, long rows truncated.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Builder pattern: append a row
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, exact match
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at (row, column name), if both exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// All cells of one column, in row order
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| r[idx].as_str()))
    }

    pub fn headers_mut(&mut self) -> &mut [String] {
        &mut self.headers
    }

    /// Apply `f` to every cell of `column`. Returns false if the column is absent.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> bool
    where
        F: FnMut(usize, &mut String),
    {
        let Some(idx) = self.column_index(column) else {
            return false;
        };
        for (i, row) in self.rows.iter_mut().enumerate() {
            f(i, &mut row[idx]);
        }
        true
    }

    /// Set every cell of `column` to `value`, appending the column if needed
    pub fn fill_column(&mut self, column: &str, value: &str) {
        match self.column_index(column) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.headers.push(column.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
    }

    /// Append all rows of `other`, aligning by header name.
    ///
    /// Headers of `other` that `self` lacks are appended (existing rows get
    /// empty cells); headers `other` lacks become empty cells in its rows.
    pub fn append(&mut self, other: Table) {
        for h in &other.headers {
            if !self.has_column(h) {
                self.headers.push(h.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        let positions: Vec<Option<usize>> = other
            .headers
            .iter()
            .map(|h| self.column_index(h))
            .collect();

        for src in other.rows {
            let mut row = vec![String::new(); self.headers.len()];
            for (cell, pos) in src.into_iter().zip(&positions) {
                if let Some(pos) = *pos {
                    row[pos] = cell;
                }
            }
            self.rows.push(row);
        }
    }
}
