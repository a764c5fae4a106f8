use indexmap::IndexMap;

use super::labels::{normalize_label, Condition};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Healthy / stressed series index
// ---------------------------------------------------------------------------

/// A dataset column: its position plus the raw header it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub index: usize,
    pub header: String,
}

/// Crop name → column, one map per condition, in column order. A replaced
/// entry keeps the position of the crop's first column.
pub type SeriesMap = IndexMap<String, ColumnRef>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesIndex {
    pub healthy: SeriesMap,
    pub stressed: SeriesMap,
}

impl SeriesIndex {
    /// Sort every non-wavelength column into the healthy or stressed map.
    ///
    /// Columns without a condition prefix are skipped. When two headers of the
    /// same condition normalise to one crop name, the later column replaces
    /// the earlier one.
    pub fn classify(dataset: &Dataset, wavelength_index: usize) -> Self {
        let mut index = SeriesIndex::default();

        for (i, col) in dataset.columns().iter().enumerate() {
            if i == wavelength_index {
                continue;
            }
            let label = normalize_label(&col.name);
            let target = match label.condition {
                Some(Condition::Healthy) => &mut index.healthy,
                Some(Condition::Stressed) => &mut index.stressed,
                None => {
                    log::debug!("Column '{}' has no condition prefix; ignored", col.name);
                    continue;
                }
            };
            let column = ColumnRef {
                index: i,
                header: col.name.clone(),
            };
            if let Some(prev) = target.insert(label.crop.clone(), column) {
                log::debug!(
                    "Column '{}' replaces '{}' as {} '{}'",
                    col.name,
                    prev.header,
                    label.condition.map(|c| c.to_string()).unwrap_or_default(),
                    label.crop
                );
            }
        }

        index
    }

    pub fn map(&self, condition: Condition) -> &SeriesMap {
        match condition {
            Condition::Healthy => &self.healthy,
            Condition::Stressed => &self.stressed,
        }
    }

    pub fn healthy_names(&self) -> Vec<String> {
        self.healthy.keys().cloned().collect()
    }

    pub fn stressed_names(&self) -> Vec<String> {
        self.stressed.keys().cloned().collect()
    }

    /// Crops measured in both conditions, sorted.
    pub fn common_crops(&self) -> Vec<String> {
        let mut common: Vec<String> = self
            .healthy
            .keys()
            .filter(|k| self.stressed.contains_key(*k))
            .cloned()
            .collect();
        common.sort();
        common
    }
}
