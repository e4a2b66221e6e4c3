use crate::color::ColorMap;
use crate::data::aggregate::{analyze, Analysis};
use crate::data::model::{Dataset, SheetCollection};
use crate::data::resolver::{resolve_dataset, ColumnMapping};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. One value per window;
/// nothing here is global, so separate sessions cannot cross-talk.
pub struct AppState {
    /// Loaded file (None until the user opens one). Replaced wholesale on
    /// every new load.
    pub workbook: Option<SheetCollection>,

    /// Name of the sheet currently shown.
    pub selected_sheet: Option<String>,

    /// Columns resolved for the selected sheet.
    pub mapping: ColumnMapping,

    /// Derived metrics and tables for the selected sheet.
    pub analysis: Option<Analysis>,

    /// Colours assigned to the distinct locations, for the charts.
    pub location_colors: Option<ColorMap>,

    /// Whether the data preview section is expanded.
    pub show_preview: bool,

    /// Whether the full data table (and its export button) is shown.
    pub show_all_rows: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            workbook: None,
            selected_sheet: None,
            mapping: ColumnMapping::default(),
            analysis: None,
            location_colors: None,
            show_preview: false,
            show_all_rows: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded file and derive everything for its first sheet.
    pub fn set_workbook(&mut self, workbook: SheetCollection) {
        let first = workbook.sheets.first().map(|s| s.name.clone());
        self.workbook = Some(workbook);
        self.selected_sheet = first;
        self.show_all_rows = false;
        self.status_message = None;
        self.recompute();
    }

    /// Switch the displayed sheet and recompute mapping and analysis.
    pub fn select_sheet(&mut self, name: String) {
        self.selected_sheet = Some(name);
        self.recompute();
    }

    /// Dataset of the currently selected sheet.
    pub fn current_dataset(&self) -> Option<&Dataset> {
        let workbook = self.workbook.as_ref()?;
        let name = self.selected_sheet.as_deref()?;
        workbook.get(name)
    }

    /// Re-derive mapping, analysis and location colours from the selected
    /// sheet. Derived state is never edited in place, only rebuilt here.
    fn recompute(&mut self) {
        let Some(dataset) = self.current_dataset() else {
            self.mapping = ColumnMapping::default();
            self.analysis = None;
            self.location_colors = None;
            return;
        };

        let mapping = resolve_dataset(dataset);
        let analysis = analyze(dataset, &mapping);

        self.location_colors = analysis.location_counts.as_ref().map(|counts| {
            let labels: Vec<&str> = counts.iter().map(|(l, _)| l.as_str()).collect();
            ColorMap::new(&labels)
        });
        self.mapping = mapping;
        self.analysis = Some(analysis);
    }
}
