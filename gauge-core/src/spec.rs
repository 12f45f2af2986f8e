//! The complete description of one gauge widget.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{GaugeError, GaugeResult};
use crate::reading::Reading;
use crate::scale::BandScale;

/// Default units suffix for the value text.
pub const DEFAULT_UNITS: &str = "%";

/// Rendered size of the gauge in pixels.
///
/// Only the height is normally configured; the width defaults to twice the
/// height, which fits the semicircular sweep plus its caption band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeSize {
    /// Optional explicit width.
    pub width: Option<u32>,
    /// Rendering height.
    pub height: u32,
}

impl GaugeSize {
    /// Default rendering height.
    pub const DEFAULT_HEIGHT: u32 = 250;

    /// A size with the given height and derived width.
    #[must_use]
    pub const fn from_height(height: u32) -> Self {
        Self {
            width: None,
            height,
        }
    }

    /// Resolved `(width, height)` in pixels, never zero.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let height = self.height.max(1);
        let width = self.width.unwrap_or_else(|| height.saturating_mul(2));
        (width.max(1), height)
    }
}

impl Default for GaugeSize {
    fn default() -> Self {
        Self::from_height(Self::DEFAULT_HEIGHT)
    }
}

/// Everything needed to draw one gauge: the reading, the band scale it is
/// judged against, the rendered size, and the units suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSpec {
    /// The measurement on display.
    pub reading: Reading,
    /// Threshold bands partitioning the domain.
    pub scale: BandScale,
    /// Rendered size.
    pub size: GaugeSize,
    /// Units suffix appended to the value text.
    pub units: String,
}

impl GaugeSpec {
    /// Create a gauge with default size and units.
    #[must_use]
    pub fn new(reading: Reading, scale: BandScale) -> Self {
        Self {
            reading,
            scale,
            size: GaugeSize::default(),
            units: DEFAULT_UNITS.to_string(),
        }
    }

    /// Set the rendered size.
    #[must_use]
    pub fn with_size(mut self, size: GaugeSize) -> Self {
        self.size = size;
        self
    }

    /// Set the units suffix.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// The same gauge with a fresh reading value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.reading = self.reading.with_value(value);
        self
    }

    /// Check the admission invariants: non-empty label, and a finite value
    /// inside the scale's threshold domain.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::EmptyLabel`] or [`GaugeError::ValueOutOfRange`].
    pub fn validate(&self) -> GaugeResult<()> {
        if self.reading.label.is_empty() {
            return Err(GaugeError::EmptyLabel);
        }
        let value = self.reading.value;
        if !value.is_finite() || !self.scale.contains(value) {
            return Err(GaugeError::ValueOutOfRange {
                value,
                min: self.scale.min(),
                max: self.scale.max(),
            });
        }
        Ok(())
    }

    /// The band color for the current value.
    #[must_use]
    pub fn color(&self) -> Color {
        self.scale.color_for(self.reading.value)
    }

    /// The current value's position in the domain, clamped to `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.scale.ratio(self.reading.value)
    }

    /// Resolved `(width, height)` in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.size.pixel_size()
    }
}

impl Default for GaugeSpec {
    /// The original artifact: "Accuracy" at 86.25 against the default
    /// four-band percentage scale, rendered 250 pixels tall.
    fn default() -> Self {
        Self::new(Reading::new("Accuracy", 86.25), BandScale::default())
    }
}
