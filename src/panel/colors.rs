//! Per-module display colors
//!
//! Each module gets a color the first time it is seen. Colors walk around the
//! hue wheel in fixed steps, so the assignment depends only on the order in
//! which modules first appear.

use std::collections::HashMap;

use ratatui::style::Color;

/// Hue of the first module, on a 0..255 wheel
const HUE_START: u32 = 30;
/// Hue advance per newly seen module
const HUE_STEP: u32 = 36;

/// Convert hue/saturation/brightness (all 0..=255) to an RGB color
pub fn hsb_to_rgb(hue: u8, saturation: u8, brightness: u8) -> Color {
    let s = saturation as f32 / 255.0;
    let v = brightness as f32 / 255.0;
    if s <= 0.0 {
        let gray = (v * 255.0).round() as u8;
        return Color::Rgb(gray, gray, gray);
    }

    let h = hue as f32 / 255.0 * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_byte(r), to_byte(g), to_byte(b))
}

/// Lazily populated module → color map
#[derive(Debug, Default, Clone)]
pub struct ModuleColorMap {
    colors: HashMap<String, Color>,
}

impl ModuleColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the color for a module, assigning the next hue if it is new
    pub fn color_for(&mut self, module: &str) -> Color {
        if let Some(color) = self.colors.get(module) {
            return *color;
        }
        let hue = (HUE_START + self.colors.len() as u32 * HUE_STEP) % 255;
        let color = hsb_to_rgb(hue as u8, 255, 255);
        self.colors.insert(module.to_string(), color);
        color
    }

    /// Number of modules seen
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_module_same_color() {
        let mut map = ModuleColorMap::new();
        let first = map.color_for("renderer");
        map.color_for("audio");
        map.color_for("net");
        assert_eq!(map.color_for("renderer"), first);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_assignment_depends_only_on_first_seen_order() {
        let mut a = ModuleColorMap::new();
        let mut b = ModuleColorMap::new();
        for module in ["x", "y", "z"] {
            assert_eq!(a.color_for(module), b.color_for(module));
        }
    }

    #[test]
    fn test_new_modules_get_different_colors() {
        let mut map = ModuleColorMap::new();
        let colors: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|m| map.color_for(m))
            .collect();
        for (i, c) in colors.iter().enumerate() {
            assert!(!colors[i + 1..].contains(c));
        }
    }

    #[test]
    fn test_hsb_to_rgb_primaries() {
        assert_eq!(hsb_to_rgb(0, 255, 255), Color::Rgb(255, 0, 0));
        assert_eq!(hsb_to_rgb(85, 255, 255), Color::Rgb(0, 255, 0));
        assert_eq!(hsb_to_rgb(0, 0, 128), Color::Rgb(128, 128, 128));
    }
}
