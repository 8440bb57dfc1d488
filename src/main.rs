mod app;
mod color;
mod data;
mod fit;
mod state;
mod ui;

use std::path::Path;

use app::BurnlabApp;
use eframe::egui;

/// Conventional location of the curated measurement export. A different
/// file can be opened at runtime via File → Open.
const DEFAULT_DATA_PATH: &str = "lab_data.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut app = BurnlabApp::default();
    let default_path = Path::new(DEFAULT_DATA_PATH);
    if default_path.exists() {
        app.state.load_file(default_path);
    } else {
        log::info!("{DEFAULT_DATA_PATH} not present, starting empty");
        app.state.status_message =
            Some(format!("{DEFAULT_DATA_PATH} not found - use File → Open…"));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Burnlab – Combustion Lab Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
