use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::ChartSpec;
use crate::data::labels::Condition;

// ---------------------------------------------------------------------------
// Trace colours
// ---------------------------------------------------------------------------

/// Green used for the healthy curve in comparison charts.
pub const HEALTHY_GREEN: Color32 = Color32::from_rgb(46, 125, 50);
/// Brown used for the stressed curve in comparison charts.
pub const STRESSED_BROWN: Color32 = Color32::from_rgb(176, 96, 32);

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.45))
        .collect()
}

/// One colour per trace, in trace order.
///
/// Traces named after a condition keep that condition's colour so
/// comparison charts read the same way every time.
pub fn trace_colors(spec: &ChartSpec) -> Vec<Color32> {
    let spread = generate_palette(spec.traces.len());
    spec.traces
        .iter()
        .zip(spread)
        .map(|(trace, fallback)| {
            if trace.name == Condition::Healthy.to_string() {
                HEALTHY_GREEN
            } else if trace.name == Condition::Stressed.to_string() {
                STRESSED_BROWN
            } else {
                fallback
            }
        })
        .collect()
}
