use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cycle colours
// ---------------------------------------------------------------------------

/// One colour per cycle, excluded cycles drawn in grey.
#[derive(Debug, Clone, Default)]
pub struct CycleColors {
    palette: Vec<Color32>,
}

impl CycleColors {
    pub fn new(cycle_count: usize) -> Self {
        Self {
            palette: generate_palette(cycle_count),
        }
    }

    /// Colour for a 1-based cycle index.
    pub fn color_for(&self, index: usize, valid: bool) -> Color32 {
        if !valid {
            return Color32::GRAY;
        }
        index
            .checked_sub(1)
            .and_then(|i| self.palette.get(i))
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}
