use std::path::Path;
use std::sync::Arc;

use crate::dashboard::{Dashboard, Selections};
use crate::data::loader::load_file;
use crate::data::model::SurveyDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The main tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    StressAnalysis,
    IndustryInsights,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::StressAnalysis, Tab::IndustryInsights];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::StressAnalysis => "Stress Analysis",
            Tab::IndustryInsights => "Industry Insights",
        }
    }
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads). Never mutated once set.
    pub dataset: Option<Arc<SurveyDataset>>,

    /// What the user picked in the select boxes.
    pub selections: Selections,

    /// Charts for the current selections (cached until a selection changes).
    pub dashboard: Option<Dashboard>,

    /// Active tab.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_region(region: Option<String>) -> Self {
        AppState {
            selections: Selections {
                region,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset and compute the first dashboard.
    pub fn set_dataset(&mut self, dataset: Arc<SurveyDataset>) {
        self.status_message = if dataset.is_empty() {
            log::warn!("Loaded dataset has no rows");
            Some("The loaded file contains no survey rows.".to_string())
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.rebuild();
    }

    /// Load `path`, replacing the current dataset on success. Failures are
    /// kept in `status_message`; the previous dataset stays in place.
    pub fn load_path(&mut self, path: &Path) -> bool {
        match load_file(path) {
            Ok(dataset) => {
                self.set_dataset(Arc::new(dataset));
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    /// Rerun filter → aggregate for the current selections.
    pub fn rebuild(&mut self) {
        self.dashboard = self
            .dataset
            .as_deref()
            .map(|ds| Dashboard::build(ds, &self.selections));
        if let Some(dash) = &self.dashboard {
            // Remember fallbacks so the select boxes show what is drawn.
            self.selections = dash.selections.clone();
        }
    }

    pub fn select_region(&mut self, region: String) {
        self.update(|s| s.region = Some(region));
    }

    pub fn select_job_role(&mut self, job_role: String) {
        self.update(|s| s.job_role = Some(job_role));
    }

    pub fn select_work_location(&mut self, location: String) {
        self.update(|s| s.work_location = Some(location));
    }

    pub fn select_industry(&mut self, industry: String) {
        self.update(|s| s.industry = Some(industry));
    }

    fn update(&mut self, change: impl FnOnce(&mut Selections)) {
        let before = self.selections.clone();
        change(&mut self.selections);
        if self.selections != before {
            self.rebuild();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_delimited;

    fn dataset() -> Arc<SurveyDataset> {
        let text = "\
Region,Job_Role,Work_Location,Industry,Stress_Level
Europe,Engineer,Remote,IT,High
Asia,Analyst,Onsite,Retail,Low
";
        Arc::new(read_delimited(text.as_bytes(), b',').unwrap())
    }

    #[test]
    fn no_dashboard_until_dataset_loaded() {
        let mut state = AppState::default();
        state.rebuild();
        assert!(state.dashboard.is_none());
    }

    #[test]
    fn initial_region_is_honoured() {
        let mut state = AppState::with_region(Some("Asia".into()));
        state.set_dataset(dataset());
        let dash = state.dashboard.as_ref().unwrap();
        assert_eq!(dash.selections.region.as_deref(), Some("Asia"));
        assert_eq!(state.selections.job_role.as_deref(), Some("Analyst"));
    }

    #[test]
    fn region_change_resets_dependent_selections() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.selections.industry.as_deref(), Some("IT"));

        state.select_region("Asia".into());
        assert_eq!(state.selections.industry.as_deref(), Some("Retail"));
        assert_eq!(state.dashboard.as_ref().unwrap().region_rows, 1);
    }

    #[test]
    fn dataset_handle_is_shared_not_copied() {
        let ds = dataset();
        let mut state = AppState::default();
        state.set_dataset(Arc::clone(&ds));
        assert!(Arc::ptr_eq(state.dataset.as_ref().unwrap(), &ds));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert!(!state.load_path(Path::new("does/not/exist.csv")));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn header_only_file_sets_status_message() {
        let empty = read_delimited("Region,Job_Role\n".as_bytes(), b',').unwrap();
        let mut state = AppState::default();
        state.set_dataset(Arc::new(empty));
        assert_eq!(
            state.status_message.as_deref(),
            Some("The loaded file contains no survey rows.")
        );
        assert!(state.dashboard.as_ref().unwrap().options.regions.is_empty());

        state.set_dataset(dataset());
        assert!(state.status_message.is_none());
    }
}
