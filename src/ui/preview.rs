use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{CSV_FILE_NAME, XLSX_FILE_NAME};
use crate::state::{AppState, NoticeLevel};

// ---------------------------------------------------------------------------
// Central panel: notices, preview table, downloads
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn output_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("BOM & Life Cycle Data Merger");
    ui.add_space(4.0);

    notices(ui, state);

    if state.report.is_none() {
        if state.notices.is_empty() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Pick both files, enter MTS codes, then press Merge.");
            });
        }
        return;
    }

    download_buttons(ui, state);
    ui.separator();
    ui.strong("Preview");
    preview_table(ui, state);
}

fn notices(ui: &mut Ui, state: &AppState) {
    for notice in &state.notices {
        let color = match notice.level {
            NoticeLevel::Success => Color32::from_rgb(60, 160, 80),
            NoticeLevel::Info => Color32::from_rgb(70, 130, 200),
            NoticeLevel::Warning => Color32::from_rgb(220, 160, 30),
            NoticeLevel::Error => Color32::RED,
        };
        ui.label(RichText::new(&notice.text).color(color));
    }
}

fn download_buttons(ui: &mut Ui, state: &mut AppState) {
    let Some(bundle) = &state.exports else {
        return;
    };

    let mut failure = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("📥 Download Output CSV").clicked() {
            failure = save_dialog(CSV_FILE_NAME, "CSV", "csv", &bundle.csv).err();
        }
        if ui.button("📥 Download Output Excel").clicked() {
            failure = save_dialog(XLSX_FILE_NAME, "Excel", "xlsx", &bundle.xlsx).err();
        }
    });

    if let Some(e) = failure {
        log::error!("Failed to save output: {e:#}");
        state.push_error(format!("Error: {e:#}"));
    }
}

/// Ask for a destination and write `bytes` there. Cancelling is not an error.
fn save_dialog(file_name: &str, label: &str, extension: &str, bytes: &[u8]) -> Result<()> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save output")
        .set_file_name(file_name)
        .add_filter(label, &[extension])
        .save_file()
    else {
        return Ok(());
    };
    write_output(&path, bytes)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };
    let table = &report.output;
    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), table.columns.len())
            .header(row_height, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, table.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_output_reports_destination_on_failure() {
        let path = Path::new("/nonexistent-dir/output.csv");
        let err = write_output(path, b"x").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent-dir/output.csv"));
    }
}
