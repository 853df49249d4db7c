use std::collections::BTreeMap;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one chart (or legend) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Assign colours in the order categories are given. Duplicates keep
    /// their first colour.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let mut unique: Vec<&str> = Vec::new();
        for c in categories {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.to_string(), color))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn categories_get_distinct_colours() {
        let map = ColorMap::new(["High", "Low", "High", "Medium"]);
        assert_ne!(map.color_for("High"), map.color_for("Low"));
        assert_ne!(map.color_for("Low"), map.color_for("Medium"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
