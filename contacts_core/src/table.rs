//! In-memory tabular data as read from an uploaded spreadsheet.
//!
//! Column schemas are only known once a file has been read, so rows are a
//! generic mapping from column name to [`Cell`]. The [`Table`] keeps the
//! header order, which drives column order on output.

use std::collections::HashMap;
use std::fmt;

/// A single table value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Raw text of a value that parses as a number.
    Number(String),
    /// Missing or blank value.
    #[default]
    Empty,
}

impl Cell {
    /// Classify a raw field the way a spreadsheet reader would.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else if raw.trim().parse::<f64>().is_ok() {
            Self::Number(raw.to_string())
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Text content, if this cell holds text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) | Self::Empty => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(raw) | Self::Number(raw) => f.write_str(raw),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Self::classify(raw)
    }
}

/// One input record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: HashMap<String, Cell>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(column, cell);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.values.insert(column.into(), cell.into());
    }

    /// Value of a column; absent columns read as [`Cell::Empty`].
    #[must_use]
    pub fn get(&self, column: &str) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.values.get(column).unwrap_or(EMPTY)
    }

    /// Every column except `excluded`, copied.
    #[must_use]
    pub fn metadata_without(&self, excluded: &str) -> HashMap<String, Cell> {
        self.values
            .iter()
            .filter(|(column, _)| column.as_str() != excluded)
            .map(|(column, cell)| (column.clone(), cell.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, cell) in iter {
            row.insert(column, cell);
        }
        row
    }
}

/// Headers plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Fail with the list of real headers when `column` is not one of them.
    pub fn require_column(&self, column: &str) -> crate::Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(crate::Error::UnknownColumn {
                column: column.to_string(),
                available: self.headers.clone(),
            })
        }
    }

    /// Headers other than `excluded`, in input order.
    pub fn metadata_headers<'a>(&'a self, excluded: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .map(String::as_str)
            .filter(move |header| *header != excluded)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
