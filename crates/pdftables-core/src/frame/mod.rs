pub mod values;

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// One value in a [`DataFrame`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(Decimal),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "NaN"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// A table as named columns over rows of typed cells.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataFrame {
    /// Build a frame from raw cell text, inferring numeric columns.
    pub fn from_text_grid(columns: Vec<String>, raw_rows: &[Vec<String>]) -> Self {
        let rows = values::type_columns(raw_rows, columns.len());
        DataFrame { columns, rows }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// True when the column holds at least one number and nothing but numbers or gaps.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        let mut any = false;
        for row in &self.rows {
            match row.get(col) {
                Some(Cell::Number(_)) => any = true,
                Some(Cell::Empty) => {}
                _ => return false,
            }
        }
        any
    }
}
