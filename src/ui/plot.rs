use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::ChartSpec;
use crate::color::trace_colors;

// ---------------------------------------------------------------------------
// Chart rendering
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 550.0;

/// Split a trace into drawable runs, breaking wherever x or y is missing.
/// Only the overlapping part of `x` and `y` can be drawn.
pub fn segments(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (xi, yi) in x.iter().zip(y) {
        match (xi, yi) {
            (Some(xv), Some(yv)) if xv.is_finite() && yv.is_finite() => current.push([*xv, *yv]),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render a chart description as an interactive line plot.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.heading(&spec.title);

    let colors = trace_colors(spec);

    Plot::new(("spectral_chart", spec.title.as_str()))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (trace, color) in spec.traces.iter().zip(colors) {
                // Runs share name and colour so the legend shows one entry.
                for run in segments(&spec.x, &trace.y) {
                    let points: PlotPoints = run.into_iter().collect();
                    let line = Line::new(points)
                        .name(&trace.name)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });
}
