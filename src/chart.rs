use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::labels::Condition;
use crate::data::loader::LoadedDataset;

// ---------------------------------------------------------------------------
// Chart description handed to the plot widget
// ---------------------------------------------------------------------------

pub const X_AXIS_LABEL: &str = "Wavelength (nm)";
pub const Y_AXIS_LABEL: &str = "Reflectance";

/// One line on the chart. `None` values are gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub y: Vec<Option<f64>>,
}

/// What to draw: titles, the shared x axis and one trace per series.
///
/// Built fresh for every render from the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<Option<f64>>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    /// Traces keep the iteration order of `series`, which is also the legend
    /// order. Lengths of `x` and each `y` are not checked against each other.
    pub fn build<I, S>(title: impl Into<String>, x: Vec<Option<f64>>, series: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Option<f64>>)>,
        S: Into<String>,
    {
        ChartSpec {
            title: title.into(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            x,
            traces: series
                .into_iter()
                .map(|(name, y)| Trace {
                    name: name.into(),
                    y,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing chart")
    }
}

// ---------------------------------------------------------------------------
// Views over a loaded dataset
// ---------------------------------------------------------------------------

/// Chart of the selected crops for one condition, in selection order.
///
/// Names missing from the condition's map are skipped. Returns `None` when
/// nothing selected is plottable.
pub fn condition_chart(
    loaded: &LoadedDataset,
    condition: Condition,
    selection: &[String],
) -> Option<ChartSpec> {
    let map = loaded.series.map(condition);
    let series: Vec<(String, Vec<Option<f64>>)> = selection
        .iter()
        .filter_map(|crop| {
            map.get(crop)
                .map(|col| (crop.clone(), loaded.dataset.numeric_column(col.index)))
        })
        .collect();

    if series.is_empty() {
        return None;
    }

    Some(ChartSpec::build(
        format!("{condition} Spectral Signatures"),
        loaded.wavelength.values.clone(),
        series,
    ))
}

pub fn healthy_chart(loaded: &LoadedDataset, selection: &[String]) -> Option<ChartSpec> {
    condition_chart(loaded, Condition::Healthy, selection)
}

pub fn stressed_chart(loaded: &LoadedDataset, selection: &[String]) -> Option<ChartSpec> {
    condition_chart(loaded, Condition::Stressed, selection)
}

/// Healthy and stressed curves of one crop. `None` unless the crop was
/// measured in both conditions.
pub fn comparison_chart(loaded: &LoadedDataset, crop: &str) -> Option<ChartSpec> {
    let healthy = loaded.series.healthy.get(crop)?;
    let stressed = loaded.series.stressed.get(crop)?;

    Some(ChartSpec::build(
        format!("Healthy vs Stressed – {crop}"),
        loaded.wavelength.values.clone(),
        [
            (
                Condition::Healthy.to_string(),
                loaded.dataset.numeric_column(healthy.index),
            ),
            (
                Condition::Stressed.to_string(),
                loaded.dataset.numeric_column(stressed.index),
            ),
        ],
    ))
}

/// Write the chart description as pretty JSON.
pub fn export_chart(path: &Path, spec: &ChartSpec) -> Result<()> {
    let json = spec.to_json()?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported chart '{}' to {}", spec.title, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::{Cell, Dataset};

    fn loaded(headers: &[&str], rows: &[&[&str]]) -> LoadedDataset {
        let ds = Dataset::from_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| Cell::parse(v)).collect())
                .collect(),
        );
        LoadedDataset::from_dataset(PathBuf::from("test.csv"), ds)
    }

    fn maize() -> LoadedDataset {
        loaded(
            &["Wavelength_nm", "Healthy_Maize", "Stressed_Maize"],
            &[
                &["400", "0,10", "0,05"],
                &["500", "0,15", "0,07"],
                &["600", "0,20", "0,09"],
            ],
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn comparison_has_two_full_traces() {
        let spec = comparison_chart(&maize(), "Maize").unwrap();
        assert_eq!(spec.title, "Healthy vs Stressed – Maize");
        assert_eq!(spec.x, vec![Some(400.0), Some(500.0), Some(600.0)]);
        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.traces[0].name, "Healthy");
        assert_eq!(spec.traces[0].y, vec![Some(0.10), Some(0.15), Some(0.20)]);
        assert_eq!(spec.traces[1].name, "Stressed");
        assert_eq!(spec.traces[1].y.len(), 3);
    }

    #[test]
    fn comparison_needs_both_conditions() {
        let ld = loaded(
            &["Wavelength", "Healthy_Maize", "Stressed_Wheat"],
            &[&["400", "0,1", "0,2"]],
        );
        assert!(comparison_chart(&ld, "Maize").is_none());
        assert!(comparison_chart(&ld, "Wheat").is_none());
    }

    #[test]
    fn selection_order_is_trace_order() {
        let ld = loaded(
            &["Wavelength", "Healthy_Maize", "Healthy_Wheat", "Healthy_Bean"],
            &[&["400", "0,1", "0,2", "0,3"]],
        );
        let spec = healthy_chart(&ld, &names(&["Wheat", "Bean", "Maize"])).unwrap();
        assert_eq!(spec.title, "Healthy Spectral Signatures");
        let order: Vec<&str> = spec.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(order, vec!["Wheat", "Bean", "Maize"]);
        assert_eq!(spec.x_label, X_AXIS_LABEL);
        assert_eq!(spec.y_label, Y_AXIS_LABEL);
    }

    #[test]
    fn unknown_or_empty_selection() {
        let ld = maize();
        assert!(stressed_chart(&ld, &[]).is_none());
        assert!(stressed_chart(&ld, &names(&["Rice"])).is_none());
        let spec = stressed_chart(&ld, &names(&["Rice", "Maize"])).unwrap();
        assert_eq!(spec.title, "Stressed Spectral Signatures");
        assert_eq!(spec.traces.len(), 1);
    }

    #[test]
    fn lengths_pass_through_unchanged() {
        let spec = ChartSpec::build(
            "t",
            vec![Some(1.0), None, Some(3.0)],
            [("short", vec![Some(0.5)]), ("long", vec![Some(0.1); 5])],
        );
        assert_eq!(spec.x.len(), 3);
        assert_eq!(spec.traces[0].y.len(), 1);
        assert_eq!(spec.traces[1].y.len(), 5);
    }

    #[test]
    fn missing_wavelengths_stay_gaps() {
        let ld = loaded(
            &["Wavelength", "Healthy_Maize"],
            &[&["400", "0,1"], &["abc", "0,2"], &["600", "0,3"]],
        );
        let spec = healthy_chart(&ld, &names(&["Maize"])).unwrap();
        assert_eq!(spec.x, vec![Some(400.0), None, Some(600.0)]);
        assert_eq!(spec.traces[0].y.len(), 3);
    }

    #[test]
    fn json_uses_null_for_gaps() {
        let spec = ChartSpec::build("t", vec![Some(400.0), None], [("Maize", vec![None, Some(0.2)])]);
        let value: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(value["x"][1], serde_json::Value::Null);
        assert_eq!(value["traces"][0]["name"], "Maize");
        assert_eq!(value["x_label"], "Wavelength (nm)");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        let spec = comparison_chart(&maize(), "Maize").unwrap();
        export_chart(&path, &spec).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Healthy vs Stressed"));
    }
}
