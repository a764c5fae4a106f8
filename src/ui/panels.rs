use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::export_chart;
use crate::state::{AppState, NavAction, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the sidebar. Not shown on the welcome page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🛰 Spectral Signature Dashboard");
    ui.label("Healthy vs stressed crop reflectance");
    ui.separator();

    ui.strong("Go to:");
    for page in Page::SIDEBAR {
        if ui.radio(state.page == page, page.label()).clicked() && state.page != page {
            state.navigate(NavAction::Sidebar(page));
        }
    }

    ui.separator();
    if let Some(loaded) = state.loaded() {
        ui.small(format!("Dataset: {}", loaded.path.display()));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.page.needs_data(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            let chart = if state.page == Page::SpectralSignatures {
                state.current_chart()
            } else {
                None
            };
            if ui
                .add_enabled(chart.is_some(), egui::Button::new("Export chart…"))
                .clicked()
            {
                if let Some(spec) = chart {
                    export_chart_dialog(state, &spec);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = state.loaded() {
            ui.label(format!(
                "{} rows, {} healthy / {} stressed series",
                loaded.dataset.len(),
                loaded.series.healthy.len(),
                loaded.series.stressed.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spectroradiometer export")
        .add_filter("Delimited text", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

fn export_chart_dialog(state: &mut AppState, spec: &crate::chart::ChartSpec) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name("chart.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export_chart(&path, spec) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
