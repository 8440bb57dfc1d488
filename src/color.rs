use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::TrialSeries;

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
// Color mapping: trial name → Color32
// ---------------------------------------------------------------------------

/// Assigns each trial of one panel a distinct, frame-stable colour. The
/// fitted trend curve reuses its trial's colour at reduced alpha so the
/// pairing reads at a glance.
#[derive(Debug, Clone, Default)]
pub struct TrialColors {
    mapping: BTreeMap<String, Color32>,
}

impl TrialColors {
    /// Build a colour map covering every trial in the store.
    pub fn new(series: &TrialSeries) -> Self {
        let trials: Vec<&str> = series.trials().collect();
        let palette = generate_palette(trials.len());
        let mapping = trials
            .into_iter()
            .zip(palette)
            .map(|(t, c)| (t.to_string(), c))
            .collect();
        TrialColors { mapping }
    }

    /// Look up the colour for a trial; unknown trials render grey.
    pub fn color_for(&self, trial: &str) -> Color32 {
        self.mapping.get(trial).copied().unwrap_or(Color32::GRAY)
    }

    /// The translucent variant used for the trend curve.
    pub fn trend_color_for(&self, trial: &str) -> Color32 {
        self.color_for(trial).gamma_multiply(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn palette_is_stable_for_fixed_n() {
        assert_eq!(generate_palette(4), generate_palette(4));
    }

    #[test]
    fn trials_get_distinct_stable_colors() {
        let mut series = TrialSeries::default();
        series.append("A", 0.0, 1.0);
        series.append("B", 0.0, 2.0);

        let colors = TrialColors::new(&series);
        assert_ne!(colors.color_for("A"), colors.color_for("B"));
        assert_eq!(colors.color_for("A"), TrialColors::new(&series).color_for("A"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }
}
