use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Detection strength gradient
// ---------------------------------------------------------------------------

/// Points whose row failed the validity rule.
pub const INVALID_COLOR: Color32 = Color32::GRAY;

/// Fallback for records carrying no drone payload.
pub const NO_SIGNAL_COLOR: Color32 = Color32::LIGHT_BLUE;

/// Map a normalized detection strength in `0.0..=1.0` to a red→green
/// gradient (red = weak, green = strong), walking the hue wheel.
pub fn strength_color(t: f32) -> Color32 {
    let hue = 120.0 * t.clamp(0.0, 1.0);
    let hsl = Hsl::new(hue, 0.85, 0.45);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Position of `v` inside `[lo, hi]`; a degenerate range maps everything
/// to the middle of the gradient.
pub fn normalized(v: f64, lo: f64, hi: f64) -> f32 {
    if hi > lo {
        ((v - lo) / (hi - lo)) as f32
    } else {
        0.5
    }
}
