use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::labels::Condition;
use crate::data::loader::LoadedDataset;
use crate::state::{AppState, NavAction, SignatureTab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Welcome
// ---------------------------------------------------------------------------

pub fn welcome(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("Healthy • Stressed • Spectral Signatures").strong());
        ui.add_space(8.0);
        ui.label(
            RichText::new("ASD SPECTRA")
                .size(52.0)
                .strong()
                .color(Color32::from_rgb(27, 94, 32)),
        );
        ui.add_space(12.0);
        ui.label(
            "Analysis and visual interpretation of crop spectral signatures from field \
             spectroradiometer measurements. Explore reflectance across the visible, \
             near-infrared and shortwave infrared regions for crops under healthy and \
             stressed conditions.",
        );
        ui.add_space(24.0);
        let start = egui::Button::new(RichText::new("🚀 Get Started").size(18.0).strong())
            .min_size(egui::vec2(220.0, 40.0));
        if ui.add(start).clicked() {
            state.navigate(NavAction::GetStarted);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared page header
// ---------------------------------------------------------------------------

/// Back button, title and load status. Returns the dataset when the page
/// can be drawn; on a load error the message is shown and nothing else.
fn page_header(ui: &mut Ui, state: &mut AppState, title: &str) -> Option<Arc<LoadedDataset>> {
    if ui.button("⬅ Back to Welcome").clicked() {
        state.navigate(NavAction::Back);
        return None;
    }
    ui.heading(RichText::new(title).size(28.0));
    ui.separator();

    if let Some(err) = state.load_error() {
        ui.label(RichText::new(err.user_message()).color(Color32::RED).strong());
        return None;
    }
    state.loaded().cloned()
}

// ---------------------------------------------------------------------------
// Spectral signatures
// ---------------------------------------------------------------------------

pub fn spectral_signatures(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = page_header(ui, state, "📈 Spectral Signature Analysis") else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        for tab in SignatureTab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    match state.tab {
        SignatureTab::Healthy => {
            crop_checklist(ui, state, Condition::Healthy, &loaded.series.healthy_names());
        }
        SignatureTab::Stressed => {
            crop_checklist(ui, state, Condition::Stressed, &loaded.series.stressed_names());
        }
        SignatureTab::Compare => {
            let common = loaded.series.common_crops();
            if common.is_empty() {
                ui.label("No crop was measured under both conditions.");
                return;
            }
            let selected = state.compare_crop.clone().unwrap_or_default();
            egui::ComboBox::from_label("Crop")
                .selected_text(&selected)
                .show_ui(ui, |ui: &mut Ui| {
                    for crop in &common {
                        if ui.selectable_label(selected == *crop, crop).clicked() {
                            state.compare_crop = Some(crop.clone());
                        }
                    }
                });
        }
    }

    ui.add_space(8.0);
    if let Some(spec) = state.current_chart() {
        plot::chart(ui, &spec);
    }
}

fn crop_checklist(ui: &mut Ui, state: &mut AppState, condition: Condition, crops: &[String]) {
    ui.strong(format!("{condition} crops"));
    if crops.is_empty() {
        ui.label(format!("No {} columns found.", condition.to_string().to_lowercase()));
        return;
    }
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for crop in crops {
            let mut checked = state.is_selected(condition, crop);
            if ui.checkbox(&mut checked, crop).changed() {
                state.toggle_selection(condition, crop);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Data preview
// ---------------------------------------------------------------------------

pub fn data_preview(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = page_header(ui, state, "Dataset Preview") else {
        return;
    };
    let ds = &loaded.dataset;

    ui.label(format!(
        "{} rows × {} columns · wavelength column '{}' · {} healthy / {} stressed series",
        ds.len(),
        ds.n_columns(),
        loaded.wavelength.name,
        loaded.series.healthy.len(),
        loaded.series.stressed.len()
    ));
    if let Some(warning) = &loaded.wavelength.warning {
        ui.label(
            RichText::new(format!(
                "{} wavelength values in '{}' are not numeric and are shown as gaps.",
                loaded.wavelength.missing_count(),
                warning.column
            ))
            .color(Color32::from_rgb(200, 120, 0)),
        );
    }
    ui.separator();

    if ds.is_empty() {
        ui.label("No data rows.");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(600.0)
            .columns(Column::auto().at_least(70.0), ds.n_columns())
            .header(22.0, |mut header| {
                for (i, col) in ds.columns().iter().enumerate() {
                    header.col(|ui: &mut Ui| {
                        let text = RichText::new(&col.name).strong();
                        if i == loaded.wavelength.index {
                            ui.label(text.color(Color32::from_rgb(27, 94, 32)));
                        } else {
                            ui.label(text);
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, ds.len(), |mut row| {
                    let r = row.index();
                    for col in ds.columns() {
                        row.col(|ui: &mut Ui| {
                            let text = col.cells.get(r).map(ToString::to_string);
                            ui.label(text.unwrap_or_default());
                        });
                    }
                });
            });
    });
}
