/// Data layer: parsing, column classification and the loader cache.
///
/// Architecture:
/// ```text
///  ASD_Data.csv  (';' separated, ',' decimals)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (memoized per path)
///   └──────────┘
///        │
///        ├──────────────► wavelength   detect column, coerce to Option<f64>
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  labels::normalize_label per header → healthy / stressed maps
///   └──────────┘
/// ```

pub mod labels;
pub mod loader;
pub mod model;
pub mod series;
pub mod wavelength;
