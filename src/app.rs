use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, preview};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BomMergerApp {
    pub state: AppState,
}

impl eframe::App for BomMergerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: notices, preview, downloads ----
        egui::CentralPanel::default().show(ctx, |ui| {
            preview::output_panel(ui, &mut self.state);
        });
    }
}
