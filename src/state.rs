use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chart::{comparison_chart, healthy_chart, stressed_chart, ChartSpec};
use crate::config::AppConfig;
use crate::data::labels::Condition;
use crate::data::loader::{DatasetLoader, LoadedDataset};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Welcome,
    SpectralSignatures,
    DataPreview,
}

impl Page {
    /// Pages offered in the sidebar.
    pub const SIDEBAR: [Page; 2] = [Page::SpectralSignatures, Page::DataPreview];

    pub fn label(self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::SpectralSignatures => "Spectral Signatures",
            Page::DataPreview => "Data Preview",
        }
    }

    /// Pages that read the dataset.
    pub fn needs_data(self) -> bool {
        !matches!(self, Page::Welcome)
    }

    pub fn apply(self, action: NavAction) -> Page {
        match action {
            NavAction::GetStarted => Page::SpectralSignatures,
            NavAction::Back => Page::Welcome,
            NavAction::Sidebar(page) => page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    GetStarted,
    Back,
    Sidebar(Page),
}

/// Tabs of the spectral signatures page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureTab {
    #[default]
    Healthy,
    Stressed,
    Compare,
}

impl SignatureTab {
    pub const ALL: [SignatureTab; 3] = [
        SignatureTab::Healthy,
        SignatureTab::Stressed,
        SignatureTab::Compare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignatureTab::Healthy => "🌱 Healthy",
            SignatureTab::Stressed => "🥀 Stressed",
            SignatureTab::Compare => "⚖ Compare",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub page: Page,
    pub tab: SignatureTab,

    /// File the data pages read from.
    pub dataset_path: PathBuf,
    loader: DatasetLoader,

    /// Outcome of the last load (None until a data page is opened).
    pub current: Option<Result<Arc<LoadedDataset>, DatasetError>>,

    /// Selected crops per condition, in the order they were picked.
    pub healthy_selection: Vec<String>,
    pub stressed_selection: Vec<String>,
    pub compare_crop: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            page: Page::default(),
            tab: SignatureTab::default(),
            dataset_path: config.dataset_path,
            loader: DatasetLoader::new(),
            current: None,
            healthy_selection: Vec::new(),
            stressed_selection: Vec::new(),
            compare_crop: None,
            status_message: None,
        }
    }

    pub fn navigate(&mut self, action: NavAction) {
        let next = self.page.apply(action);
        log::debug!("Navigate {:?} --{action:?}--> {next:?}", self.page);
        self.page = next;
        if next.needs_data() {
            self.ensure_loaded();
        }
    }

    /// Load (or fetch from cache) the dataset at `dataset_path`.
    pub fn ensure_loaded(&mut self) {
        let result = self.loader.load(&self.dataset_path);
        match &result {
            Ok(loaded) => {
                let same = matches!(&self.current, Some(Ok(prev)) if Arc::ptr_eq(prev, loaded));
                if !same {
                    self.reset_selection(loaded);
                }
            }
            Err(e) => log::error!("Failed to load dataset: {e}"),
        }
        self.current = Some(result);
    }

    /// Switch to another file, e.g. from File → Open….
    pub fn open_path(&mut self, path: &Path) {
        self.dataset_path = path.to_path_buf();
        self.status_message = None;
        if self.page == Page::Welcome {
            self.page = Page::SpectralSignatures;
        }
        self.ensure_loaded();
    }

    /// Drop the cached copy and read the file again. On the welcome page only
    /// the cache entry is dropped; the next data page reads the file.
    pub fn reload(&mut self) {
        self.loader.invalidate(&self.dataset_path);
        if self.page.needs_data() {
            self.ensure_loaded();
        }
    }

    pub fn loaded(&self) -> Option<&Arc<LoadedDataset>> {
        match &self.current {
            Some(Ok(loaded)) => Some(loaded),
            _ => None,
        }
    }

    pub fn load_error(&self) -> Option<&DatasetError> {
        match &self.current {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }

    /// Keep only selections that still exist in the new dataset.
    fn reset_selection(&mut self, loaded: &LoadedDataset) {
        self.healthy_selection
            .retain(|c| loaded.series.healthy.contains_key(c));
        self.stressed_selection
            .retain(|c| loaded.series.stressed.contains_key(c));
        let common = loaded.series.common_crops();
        if !self
            .compare_crop
            .as_ref()
            .is_some_and(|c| common.contains(c))
        {
            self.compare_crop = common.into_iter().next();
        }
    }

    pub fn selection(&self, condition: Condition) -> &[String] {
        match condition {
            Condition::Healthy => &self.healthy_selection,
            Condition::Stressed => &self.stressed_selection,
        }
    }

    pub fn is_selected(&self, condition: Condition, crop: &str) -> bool {
        self.selection(condition).iter().any(|c| c == crop)
    }

    /// Add or remove a crop from a condition's selection.
    pub fn toggle_selection(&mut self, condition: Condition, crop: &str) {
        let selection = match condition {
            Condition::Healthy => &mut self.healthy_selection,
            Condition::Stressed => &mut self.stressed_selection,
        };
        match selection.iter().position(|c| c == crop) {
            Some(pos) => {
                selection.remove(pos);
            }
            None => selection.push(crop.to_string()),
        }
    }

    /// Chart for the active tab, built from the current selection.
    pub fn current_chart(&self) -> Option<ChartSpec> {
        let loaded = self.loaded()?;
        match self.tab {
            SignatureTab::Healthy => healthy_chart(loaded, &self.healthy_selection),
            SignatureTab::Stressed => stressed_chart(loaded, &self.stressed_selection),
            SignatureTab::Compare => comparison_chart(loaded, self.compare_crop.as_deref()?),
        }
    }
}
