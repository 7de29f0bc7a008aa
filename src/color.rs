use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

pub const HISTOGRAM: Color32 = Color32::from_rgb(70, 110, 220);
pub const CURVE: Color32 = Color32::from_rgb(30, 30, 30);
pub const SELECTED: Color32 = Color32::from_rgb(220, 40, 40);

/// `n` shades of green for the percentile markers, dark to light.
pub fn threshold_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            let hsl = Hsl::new(125.0, 0.65, 0.28 + 0.32 * t);
            to_color32(hsl.into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
