use super::model::{Cell, Dataset};

// ---------------------------------------------------------------------------
// Wavelength column detection
// ---------------------------------------------------------------------------

/// Pick the column holding the wavelength axis.
///
/// This is a naming heuristic rather than a schema check: the first column
/// whose name contains "wave" (any case) wins, otherwise the first column.
/// It never fails.
pub fn detect_wavelength_index(names: &[String]) -> usize {
    names
        .iter()
        .position(|n| n.to_lowercase().contains("wave"))
        .unwrap_or(0)
}

/// Parse a number written with either a comma or a dot as decimal separator.
pub fn coerce_decimal(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Coerced wavelength axis
// ---------------------------------------------------------------------------

/// Rows of the wavelength column that could not be read as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    pub column: String,
    pub missing_rows: Vec<usize>,
}

/// The wavelength column as numbers, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthAxis {
    pub index: usize,
    pub name: String,
    /// `None` marks a cell that failed coercion.
    pub values: Vec<Option<f64>>,
    pub warning: Option<CoercionWarning>,
}

impl WavelengthAxis {
    pub fn from_dataset(dataset: &Dataset, index: usize) -> Self {
        let (name, values): (String, Vec<Option<f64>>) = match dataset.column(index) {
            Some(col) => (
                col.name.clone(),
                col.cells.iter().map(Cell::as_f64).collect(),
            ),
            None => (String::new(), Vec::new()),
        };

        let missing_rows: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect();

        let warning = if missing_rows.is_empty() {
            None
        } else {
            log::warn!(
                "{} of {} values in wavelength column '{name}' are not numeric; plotting with gaps",
                missing_rows.len(),
                values.len()
            );
            Some(CoercionWarning {
                column: name.clone(),
                missing_rows,
            })
        };

        WavelengthAxis {
            index,
            name,
            values,
            warning,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.warning
            .as_ref()
            .map(|w| w.missing_rows.len())
            .unwrap_or(0)
    }
}
