use eframe::egui::{self, Button, RichText, TextEdit, Ui};

use crate::data::loader::UploadedFile;
use crate::data::merge::JoinPolicy;
use crate::data::schema::SchemaVariant;
use crate::state::AppState;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods", "csv"];

/// Which input a file dialog fills.
#[derive(Debug, Clone, Copy)]
pub enum InputSlot {
    Bom,
    LifeCycle,
}

impl InputSlot {
    fn title(self) -> &'static str {
        match self {
            InputSlot::Bom => "Select BOM file",
            InputSlot::LifeCycle => "Select Life Cycle file",
        }
    }
}

// ---------------------------------------------------------------------------
// Left side panel – input form
// ---------------------------------------------------------------------------

/// Render the input form: both uploads, the MTS list and merge options.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Upload BOM File");
            file_row(ui, state, InputSlot::Bom);
            ui.add_space(8.0);

            ui.strong("Upload Life Cycle File");
            file_row(ui, state, InputSlot::LifeCycle);
            ui.add_space(8.0);

            ui.strong("MTS List");
            ui.label("Enter MTS codes (one per line or comma-separated):");
            ui.add(
                TextEdit::multiline(&mut state.inputs.codes_text)
                    .hint_text("MTS001\nMTS002\nMTS003\n\nOr: MTS001,MTS002,MTS003")
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );
            ui.separator();

            ui.strong("Output layout");
            let current = state.options.variant;
            egui::ComboBox::from_id_salt("output_layout")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for variant in SchemaVariant::ALL {
                        ui.selectable_value(&mut state.options.variant, variant, variant.label());
                    }
                });

            ui.strong("Duplicate life cycle PN");
            let current = state.options.join_policy;
            egui::ComboBox::from_id_salt("join_policy")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for policy in JoinPolicy::ALL {
                        ui.selectable_value(&mut state.options.join_policy, policy, policy.label());
                    }
                });
            ui.separator();

            if ui
                .add_sized([ui.available_width(), 28.0], Button::new(RichText::new("Merge").strong()))
                .clicked()
            {
                state.process();
            }
        });
}

fn file_row(ui: &mut Ui, state: &mut AppState, slot: InputSlot) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Browse…").clicked() {
            open_file_dialog(state, slot);
        }
        let picked = match slot {
            InputSlot::Bom => state.inputs.bom.as_ref(),
            InputSlot::LifeCycle => state.inputs.life_cycle.as_ref(),
        };
        match picked {
            Some(file) => ui.label(file.name.as_str()),
            None => ui.weak("No file selected"),
        };
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open BOM…").clicked() {
                open_file_dialog(state, InputSlot::Bom);
                ui.close_menu();
            }
            if ui.button("Open Life Cycle…").clicked() {
                open_file_dialog(state, InputSlot::LifeCycle);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Clear inputs").clicked() {
                state.clear_inputs();
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(format!(
                "{} BOM rows, {} life cycle rows, {} output rows",
                report.bom_rows,
                report.life_cycle_rows,
                report.output.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, slot: InputSlot) {
    let file = rfd::FileDialog::new()
        .set_title(slot.title())
        .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xls", "xlsm", "xlsb"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match UploadedFile::from_path(&path) {
            Ok(upload) => {
                log::info!("Picked {:?} ({} bytes) for {slot:?}", upload.name, upload.bytes.len());
                match slot {
                    InputSlot::Bom => state.set_bom(upload),
                    InputSlot::LifeCycle => state.set_life_cycle(upload),
                }
            }
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                state.push_error(format!("Error: {e:#}"));
            }
        }
    }
}
