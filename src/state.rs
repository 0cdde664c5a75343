use std::path::{Path, PathBuf};

use anyhow::Result;

use cv_analyzer::data::config::AnalysisConfig;
use cv_analyzer::data::error::SensitivityWarning;
use cv_analyzer::data::model::AnalysisResult;
use cv_analyzer::data::summary::Summary;
use cv_analyzer::data::{analyze, loader};
use cv_analyzer::style::StyleStore;

use crate::color::CycleColors;

/// Settings file next to the working directory.
const STYLE_FILE: &str = "cv-analyzer-style.json";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Path and text of the last imported export, kept for re-analysis.
    pub source: Option<(PathBuf, String)>,

    /// Latest analysis (None until a file imports successfully).
    pub result: Option<AnalysisResult>,

    /// Summary of `result`.
    pub summary: Option<Summary>,

    /// Sensitivity warnings of `result`.
    pub warnings: Vec<SensitivityWarning>,

    /// Parameters applied on the next analysis.
    pub config: AnalysisConfig,

    /// Electrode area entered by the user (cm²), applied when `override_area` is set.
    pub electrode_area: f64,
    pub override_area: bool,

    pub colors: CycleColors,

    pub style: StyleStore,
    pub show_style_window: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: None,
            result: None,
            summary: None,
            warnings: Vec::new(),
            config: AnalysisConfig::default(),
            electrode_area: cv_analyzer::data::model::DEFAULT_ELECTRODE_AREA,
            override_area: false,
            colors: CycleColors::default(),
            style: StyleStore::open(STYLE_FILE),
            show_style_window: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Read a new export and analyse it, replacing any previous result.
    pub fn import(&mut self, path: &Path) -> Result<()> {
        let text = loader::read_export(path)?;
        self.source = Some((path.to_path_buf(), text));
        self.reanalyze()
    }

    /// Re-run the pipeline on the last import with the current settings.
    pub fn reanalyze(&mut self) -> Result<()> {
        let Some((path, text)) = &self.source else {
            return Ok(());
        };
        self.config.electrode_area = self.override_area.then_some(self.electrode_area);

        match analyze(text, &self.config) {
            Ok(result) => {
                log::info!(
                    "Loaded {}: {} cycles, {} valid",
                    path.display(),
                    result.cycles().len(),
                    result.statistics().valid_count
                );
                self.set_result(result);
                Ok(())
            }
            Err(e) => {
                let err = anyhow::Error::new(e).context(format!("importing {}", path.display()));
                self.clear_result();
                Err(err)
            }
        }
    }

    fn set_result(&mut self, result: AnalysisResult) {
        if !self.override_area {
            self.electrode_area = result.metadata().electrode_area;
        }
        self.colors = CycleColors::new(result.cycles().len());
        self.summary = Some(Summary::from_result(&result));
        self.warnings = result.warnings();
        self.result = Some(result);
        self.status_message = None;
    }

    fn clear_result(&mut self) {
        self.result = None;
        self.summary = None;
        self.warnings.clear();
    }
}
