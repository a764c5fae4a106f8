mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::SpectraDashboardApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1250.0, 850.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spectral Signature Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SpectraDashboardApp::new(config)))),
    )
}
