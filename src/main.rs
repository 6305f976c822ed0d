mod app;
mod data;
mod state;
mod ui;

use app::BomMergerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BOM & Life Cycle Merger",
        options,
        Box::new(|_cc| Ok(Box::new(BomMergerApp::default()))),
    )
}
