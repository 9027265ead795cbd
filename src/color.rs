use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Probability tint
// ---------------------------------------------------------------------------

/// Hue at probability 0 (red) and 1 (green).
const LOW_HUE: f32 = 0.0;
const HIGH_HUE: f32 = 120.0;

/// Colour for a probability on a red → amber → green scale.
/// Out-of-range and non-finite inputs are clamped (NaN maps to the low end).
pub fn probability_color(p: f64) -> Color32 {
    let t = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) as f32 };
    let hue = LOW_HUE + t * (HIGH_HUE - LOW_HUE);
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_are_red_and_green() {
        let low = probability_color(0.0);
        let high = probability_color(1.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(probability_color(-0.5), probability_color(0.0));
        assert_eq!(probability_color(3.0), probability_color(1.0));
        assert_eq!(probability_color(f64::NAN), probability_color(0.0));
    }
}
