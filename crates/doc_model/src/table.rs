//! Table grid carried by table blocks

use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};

/// Rectangular grid of cell strings, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create an empty grid of the given shape. Zero dimensions are raised to 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self {
            rows: vec![vec![String::new(); cols]; rows.max(1)],
        }
    }

    /// The grid a freshly created table is seeded with
    pub fn seed() -> Self {
        Self {
            rows: vec![
                vec!["Cell 1".to_string(), "Cell 2".to_string()],
                vec!["Cell 3".to_string(), "Cell 4".to_string()],
            ],
        }
    }

    /// Build a grid from ragged rows, padding short rows with empty cells
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        if rows.is_empty() {
            rows.push(vec![String::new(); width]);
        }
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(DocModelError::CellOutOfRange { row, col })?;
        *cell = text.into();
        Ok(())
    }

    /// Append an empty row
    pub fn add_row(&mut self) {
        let cols = self.col_count();
        self.rows.push(vec![String::new(); cols]);
    }

    /// Append an empty column
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        if self.rows.len() <= 1 {
            return Err(DocModelError::InvalidOperation(
                "cannot remove the last table row".to_string(),
            ));
        }
        if index >= self.rows.len() {
            return Err(DocModelError::CellOutOfRange { row: index, col: 0 });
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Remove a column. The last remaining column cannot be removed.
    pub fn remove_column(&mut self, index: usize) -> Result<()> {
        let cols = self.col_count();
        if cols <= 1 {
            return Err(DocModelError::InvalidOperation(
                "cannot remove the last table column".to_string(),
            ));
        }
        if index >= cols {
            return Err(DocModelError::CellOutOfRange { row: 0, col: index });
        }
        for row in &mut self.rows {
            row.remove(index);
        }
        Ok(())
    }
}

impl From<Vec<Vec<String>>> for TableGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<TableGrid> for Vec<Vec<String>> {
    fn from(grid: TableGrid) -> Self {
        grid.rows
    }
}
