use crate::data::codes::parse_codes;
use crate::data::error::{MergeError, Severity};
use crate::data::export::{ExportBundle, export};
use crate::data::loader::UploadedFile;
use crate::data::merge::MergeOptions;
use crate::data::pipeline::{MergeInputs, MergeReport, run};

// ---------------------------------------------------------------------------
// User notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message shown above the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Notice {
            level,
            text: text.into(),
        }
    }
}

impl From<&MergeError> for Notice {
    fn from(err: &MergeError) -> Self {
        let level = match err.severity() {
            Severity::Warning => NoticeLevel::Warning,
            Severity::Error => NoticeLevel::Error,
        };
        Notice::new(level, err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Uploaded files and the MTS text area.
    pub inputs: MergeInputs,

    /// Output layout and duplicate-key policy.
    pub options: MergeOptions,

    /// Result of the last successful run.
    pub report: Option<MergeReport>,

    /// Download payloads for `report`.
    pub exports: Option<ExportBundle>,

    /// Messages from the last run or file action.
    pub notices: Vec<Notice>,
}

impl AppState {
    pub fn set_bom(&mut self, file: UploadedFile) {
        self.inputs.bom = Some(file);
        self.clear_result();
    }

    pub fn set_life_cycle(&mut self, file: UploadedFile) {
        self.inputs.life_cycle = Some(file);
        self.clear_result();
    }

    /// Forget uploaded files, codes and any output.
    pub fn clear_inputs(&mut self) {
        self.inputs = MergeInputs::default();
        self.clear_result();
        self.notices.clear();
    }

    /// Drop output that no longer matches the inputs.
    pub fn clear_result(&mut self) {
        self.report = None;
        self.exports = None;
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::new(NoticeLevel::Error, text));
    }

    pub fn push_info(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::new(NoticeLevel::Info, text));
    }

    fn push_loaded(&mut self, codes: &[String]) {
        self.notices
            .push(Notice::new(NoticeLevel::Success, "✓ Files loaded successfully"));
        self.push_info(format!("MTS codes to filter: {}", codes.join(", ")));
    }

    /// Run the full pipeline on the current inputs and prepare downloads.
    pub fn process(&mut self) {
        self.clear_result();
        self.notices.clear();

        let report = match run(&self.inputs, self.options) {
            Ok(report) => report,
            Err(err) => {
                // Both files loaded and the codes parsed before the filter came up empty.
                if let MergeError::EmptyResult { .. } = err {
                    if let Ok(codes) = parse_codes(&self.inputs.codes_text) {
                        self.push_loaded(codes.as_slice());
                    }
                }
                self.notices.push(Notice::from(&err));
                return;
            }
        };

        self.push_loaded(report.codes.as_slice());

        match export(&report.output) {
            Ok(bundle) => {
                self.notices.push(Notice::new(
                    NoticeLevel::Success,
                    format!("✓ Processed {} rows", report.output.len()),
                ));
                self.exports = Some(bundle);
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.push_error(MergeError::unclassified(e).to_string());
            }
        }
        self.report = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::export::to_xlsx_bytes;
    use crate::data::model::CellValue;
    use crate::data::testutil::{bom_table, life_cycle_table};

    fn loaded_state(codes: &str) -> AppState {
        let mut state = AppState::default();
        state.set_bom(UploadedFile {
            name: "bom.xlsx".into(),
            bytes: to_xlsx_bytes(&bom_table(&[("A1", "100"), ("B2", "200")]), "Sheet1").unwrap(),
        });
        state.set_life_cycle(UploadedFile {
            name: "life_cycle.xlsx".into(),
            bytes: to_xlsx_bytes(&life_cycle_table(&[("100", CellValue::Integer(5))]), "Sheet1")
                .unwrap(),
        });
        state.inputs.codes_text = codes.to_string();
        state
    }

    fn levels(state: &AppState) -> Vec<NoticeLevel> {
        state.notices.iter().map(|n| n.level).collect()
    }

    #[test]
    fn successful_run_offers_downloads() {
        let mut state = loaded_state("A1\nB2");
        state.process();

        assert_eq!(
            levels(&state),
            [NoticeLevel::Success, NoticeLevel::Info, NoticeLevel::Success]
        );
        assert_eq!(state.notices[1].text, "MTS codes to filter: A1, B2");
        assert_eq!(state.notices[2].text, "✓ Processed 2 rows");
        assert!(state.exports.is_some());
        assert_eq!(state.report.as_ref().map(|r| r.output.len()), Some(2));
    }

    #[test]
    fn empty_result_is_a_warning_without_downloads() {
        let mut state = loaded_state("Q9");
        state.process();

        assert_eq!(
            levels(&state),
            [NoticeLevel::Success, NoticeLevel::Info, NoticeLevel::Warning]
        );
        assert_eq!(state.notices[1].text, "MTS codes to filter: Q9");
        assert!(state.report.is_none());
        assert!(state.exports.is_none());
    }

    #[test]
    fn blank_codes_report_an_error() {
        let mut state = loaded_state("  ");
        state.process();
        assert_eq!(levels(&state), [NoticeLevel::Error]);
        assert_eq!(state.notices[0].text, "Please enter at least one MTS code");
    }

    #[test]
    fn new_upload_invalidates_previous_output() {
        let mut state = loaded_state("A1");
        state.process();
        assert!(state.exports.is_some());

        state.set_bom(UploadedFile {
            name: "other.csv".into(),
            bytes: b"MTS,PN\n".to_vec(),
        });
        assert!(state.report.is_none());
        assert!(state.exports.is_none());
    }

    #[test]
    fn clear_inputs_resets_everything() {
        let mut state = loaded_state("A1");
        state.process();
        state.clear_inputs();
        assert!(state.inputs.bom.is_none());
        assert!(state.inputs.codes_text.is_empty());
        assert!(state.notices.is_empty());
    }
}
