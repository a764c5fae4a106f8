use std::fmt;

use super::wavelength::coerce_decimal;

// ---------------------------------------------------------------------------
// Cell – a single value in a dataset column
// ---------------------------------------------------------------------------

/// A raw cell as read from the delimited file.
///
/// Numbers are recognised with the comma decimal separator already
/// normalised; everything else stays as text until a later stage asks for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Interpret one raw field from the file.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match coerce_decimal(trimmed) {
            Some(v) => Cell::Number(v),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell; `None` is the missing marker.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => coerce_decimal(s),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// The parsed file: ordered columns, all of the same length.
///
/// Row order is kept exactly as in the file since it follows the
/// measurement order along the wavelength axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Assemble a dataset from row-major records.
    ///
    /// Callers guarantee every row has `headers.len()` fields; the loader
    /// rejects ragged input before it gets here.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let n_rows = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(n_rows),
            })
            .collect();

        let n_cols = columns.len();
        for (r, row) in rows.into_iter().enumerate() {
            debug_assert_eq!(row.len(), n_cols, "row {r} width differs from header");
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }

        Dataset { columns, n_rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Values of a column as numbers, `None` where a cell is not numeric.
    pub fn numeric_column(&self, index: usize) -> Vec<Option<f64>> {
        self.columns
            .get(index)
            .map(|c| c.cells.iter().map(Cell::as_f64).collect())
            .unwrap_or_default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}
