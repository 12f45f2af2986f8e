//! Visual constants for gauge rendering.

use gauge_core::Color;

/// Colors, typography, and arc proportions for a rendered gauge.
///
/// The defaults match the original widget: a light gray track behind a
/// single band-colored value arc, dark gray text, sans-serif type.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeTheme {
    /// Fill of the full-sweep track behind the value arc.
    pub track_color: Color,
    /// Document background.
    pub background: Color,
    /// Fill of the centered value text.
    pub value_color: Color,
    /// Fill of the label under the gauge.
    pub label_color: Color,
    /// Fill of the domain min/max captions at the arc ends.
    pub caption_color: Color,
    /// Font family for all text.
    pub font_family: String,
    /// Annulus thickness as a fraction of the outer radius.
    pub thickness: f64,
    /// Outer padding in pixels.
    pub padding: f64,
}

impl Default for GaugeTheme {
    fn default() -> Self {
        Self {
            track_color: Color::new(0xE0, 0xE0, 0xE0),
            background: Color::new(0xFF, 0xFF, 0xFF),
            value_color: Color::new(0x33, 0x33, 0x33),
            label_color: Color::new(0x55, 0x55, 0x55),
            caption_color: Color::new(0x77, 0x77, 0x77),
            font_family: "sans-serif".to_string(),
            thickness: 0.30,
            padding: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track_is_light_gray() {
        let theme = GaugeTheme::default();
        assert_eq!(theme.track_color.to_string(), "#E0E0E0");
        assert!(theme.thickness > 0.0 && theme.thickness < 1.0);
    }
}
