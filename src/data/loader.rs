use std::collections::HashMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;

use super::model::{Cell, Dataset};
use super::series::SeriesIndex;
use super::wavelength::{detect_wavelength_index, WavelengthAxis};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Raw file → Dataset
// ---------------------------------------------------------------------------

/// Field separator of the spectroradiometer export.
pub const DELIMITER: u8 = b';';

/// Parse a `;`-separated file with comma decimals into a [`Dataset`].
///
/// Layout: the first row holds the headers, every following row one
/// measurement. Headers are trimmed and inner whitespace collapsed. All rows
/// must have as many fields as the header row.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| read_error(path, err))?
        .iter()
        .map(clean_header)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::Parse {
            path: path.to_path_buf(),
            message: "no header row".to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record: StringRecord = result.map_err(|err| read_error(path, err))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Ok(Dataset::from_rows(headers, rows))
}

fn clean_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reader failures are I/O errors; everything else the reader rejects is a
/// parse error.
fn read_error(path: &Path, err: csv::Error) -> DatasetError {
    let message = describe_csv_error(&err);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => DatasetError::Parse {
            path: path.to_path_buf(),
            message,
        },
    }
}

fn describe_csv_error(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
            format!("line {line} has {len} fields, expected {expected_len}")
        }
        csv::ErrorKind::Utf8 { pos, .. } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
            format!("line {line} is not valid UTF-8")
        }
        _ => err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Loaded dataset: table + wavelength axis + series index
// ---------------------------------------------------------------------------

/// Everything derived from one input file. Immutable once built.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub path: PathBuf,
    pub dataset: Dataset,
    pub wavelength: WavelengthAxis,
    pub series: SeriesIndex,
}

impl LoadedDataset {
    pub fn from_dataset(path: PathBuf, dataset: Dataset) -> Self {
        let wl_index = detect_wavelength_index(&dataset.column_names());
        let wavelength = WavelengthAxis::from_dataset(&dataset, wl_index);
        let series = SeriesIndex::classify(&dataset, wl_index);
        LoadedDataset {
            path,
            dataset,
            wavelength,
            series,
        }
    }
}

// ---------------------------------------------------------------------------
// Memoizing loader
// ---------------------------------------------------------------------------

/// Storage for already-loaded files, keyed by the path they were loaded from.
pub trait DatasetCache {
    fn get(&self, path: &Path) -> Option<Arc<LoadedDataset>>;
    fn insert(&mut self, path: PathBuf, loaded: Arc<LoadedDataset>);
    fn remove(&mut self, path: &Path);
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<PathBuf, Arc<LoadedDataset>>,
}

#[cfg(test)]
impl MemoryCache {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DatasetCache for MemoryCache {
    fn get(&self, path: &Path) -> Option<Arc<LoadedDataset>> {
        self.entries.get(path).cloned()
    }

    fn insert(&mut self, path: PathBuf, loaded: Arc<LoadedDataset>) {
        self.entries.insert(path, loaded);
    }

    fn remove(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

/// Cache that never remembers anything; every load hits the disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl DatasetCache for NoCache {
    fn get(&self, _path: &Path) -> Option<Arc<LoadedDataset>> {
        None
    }

    fn insert(&mut self, _path: PathBuf, _loaded: Arc<LoadedDataset>) {}

    fn remove(&mut self, _path: &Path) {}
}

/// Loads a file once and hands out the shared result afterwards.
/// Failed loads are not remembered.
#[derive(Debug, Default)]
pub struct DatasetLoader<C: DatasetCache = MemoryCache> {
    cache: C,
}

impl DatasetLoader<MemoryCache> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: DatasetCache> DatasetLoader<C> {
    pub fn with_cache(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<LoadedDataset>, DatasetError> {
        if let Some(hit) = self.cache.get(path) {
            return Ok(hit);
        }

        let dataset = load_dataset(path)?;
        let loaded = Arc::new(LoadedDataset::from_dataset(path.to_path_buf(), dataset));
        log::info!(
            "Loaded {} rows × {} columns from {} (wavelength column '{}', {} healthy, {} stressed)",
            loaded.dataset.len(),
            loaded.dataset.n_columns(),
            path.display(),
            loaded.wavelength.name,
            loaded.series.healthy.len(),
            loaded.series.stressed.len()
        );

        self.cache.insert(path.to_path_buf(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Forget the cached result for `path` so the next load rereads it.
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    const MAIZE: &str = "Wavelength_nm;Healthy_Maize;Stressed_Maize\n\
                         400;0,10;0,05\n\
                         500;0,15;0,07\n\
                         600;0,20;0,09\n";

    #[test]
    fn parses_semicolon_comma_decimal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", MAIZE.as_bytes());
        let ds = load_dataset(&path).unwrap();

        assert_eq!(
            ds.column_names(),
            vec!["Wavelength_nm", "Healthy_Maize", "Stressed_Maize"]
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.numeric_column(1), vec![Some(0.10), Some(0.15), Some(0.20)]);
        assert_eq!(ds.numeric_column(2), vec![Some(0.05), Some(0.07), Some(0.09)]);
    }

    #[test]
    fn headers_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", b"  Wavelength  nm ; Healthy_Bean \n1;2\n");
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.column_names(), vec!["Wavelength nm", "Healthy_Bean"]);
    }

    #[test]
    fn same_file_same_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", MAIZE.as_bytes());
        assert_eq!(load_dataset(&path).unwrap(), load_dataset(&path).unwrap());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ASD_Data.csv");
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
        assert!(err.user_message().contains("ASD_Data.csv not found"));
    }

    #[test]
    #[cfg(unix)]
    fn directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn ragged_rows_are_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", b"Wavelength;Healthy_Maize\n400;0,1\n500\n");
        let err = load_dataset(&path).unwrap_err();
        match err {
            DatasetError::Parse { message, .. } => assert!(message.contains("has 1 fields, expected 2")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", b"Wavelength;Healthy_Maize\n400;\xff\xfe\n");
        assert!(matches!(
            load_dataset(&path),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn empty_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", b"");
        assert!(matches!(
            load_dataset(&path),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn loaded_dataset_classifies_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", MAIZE.as_bytes());
        let mut loader = DatasetLoader::new();
        let loaded = loader.load(&path).unwrap();

        assert_eq!(loaded.wavelength.name, "Wavelength_nm");
        assert_eq!(
            loaded.wavelength.values,
            vec![Some(400.0), Some(500.0), Some(600.0)]
        );
        assert_eq!(loaded.series.healthy["Maize"].header, "Healthy_Maize");
        assert_eq!(loaded.series.stressed["Maize"].header, "Stressed_Maize");
    }

    #[test]
    fn loader_memoizes_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.csv", MAIZE.as_bytes());
        let b = write_file(&dir, "b.csv", b"Wavelength;Stress_Wheat\n400;0,3\n");
        let mut loader = DatasetLoader::new();

        let first = loader.load(&a).unwrap();
        let again = loader.load(&a).unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        let other = loader.load(&b).unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(other.series.stressed_names(), vec!["Wheat".to_string()]);
        assert_eq!(loader.cache().len(), 2);
    }

    #[test]
    fn invalidate_rereads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", MAIZE.as_bytes());
        let mut loader = DatasetLoader::new();
        let first = loader.load(&path).unwrap();

        write_file(&dir, "asd.csv", b"Wavelength;Healthy_Bean\n400;0,3\n");
        assert!(Arc::ptr_eq(&first, &loader.load(&path).unwrap()));

        loader.invalidate(&path);
        let fresh = loader.load(&path).unwrap();
        assert_eq!(fresh.series.healthy_names(), vec!["Bean".to_string()]);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let mut loader = DatasetLoader::new();
        assert!(matches!(
            loader.load(&path),
            Err(DatasetError::NotFound { .. })
        ));
        assert!(loader.cache().is_empty());

        write_file(&dir, "later.csv", MAIZE.as_bytes());
        assert!(loader.load(&path).is_ok());
    }

    #[test]
    fn no_cache_always_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "asd.csv", MAIZE.as_bytes());
        let mut loader = DatasetLoader::with_cache(NoCache);
        let a = loader.load(&path).unwrap();
        let b = loader.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.dataset, b.dataset);
    }
}
