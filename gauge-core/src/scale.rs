//! Threshold band scales: the value → color mapping.
//!
//! A [`BandScale`] partitions a numeric domain `[min, max]` into up to
//! [`MAX_BANDS`] contiguous color bands by a list of strictly ascending
//! upper boundaries. The last boundary is the domain maximum.
//!
//! Band membership is lower-inclusive: a value equal to a boundary belongs
//! to the band above it, and values at or past the last boundary keep the
//! last band's color.

use crate::color::Color;
use crate::error::{GaugeError, GaugeResult};

/// Maximum number of color bands in a scale.
pub const MAX_BANDS: usize = 4;

/// One color band: its fill color and exclusive upper boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Fill color for values inside this band.
    pub color: Color,
    /// Upper boundary (exclusive, except for the last band).
    pub upper: f64,
}

/// An ordered set of threshold bands over a numeric domain.
///
/// Invariants are enforced at construction: at least one band, at most
/// [`MAX_BANDS`], and boundaries strictly ascending from the domain minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    min: f64,
    bands: Vec<Band>,
}

impl BandScale {
    /// Create a scale from a domain minimum and ordered bands.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::EmptyScale`] for an empty band list,
    /// [`GaugeError::TooManyBands`] past [`MAX_BANDS`], and
    /// [`GaugeError::ThresholdOrder`] when boundaries are non-finite or not
    /// strictly ascending from `min`.
    pub fn new(min: f64, bands: Vec<Band>) -> GaugeResult<Self> {
        if bands.is_empty() {
            return Err(GaugeError::EmptyScale);
        }
        if bands.len() > MAX_BANDS {
            return Err(GaugeError::TooManyBands(bands.len()));
        }
        if !min.is_finite() {
            return Err(GaugeError::ThresholdOrder(format!(
                "domain minimum {min} is not finite"
            )));
        }
        let mut prev = min;
        for band in &bands {
            if !band.upper.is_finite() || band.upper <= prev {
                return Err(GaugeError::ThresholdOrder(format!(
                    "boundary {} does not ascend past {prev}",
                    band.upper
                )));
            }
            prev = band.upper;
        }
        Ok(Self { min, bands })
    }

    /// Create a scale by zipping a color pattern with threshold boundaries,
    /// the two lists a gauge document carries.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::PatternMismatch`] when the lists differ in
    /// length, plus everything [`BandScale::new`] rejects.
    pub fn from_parts(min: f64, colors: Vec<Color>, uppers: Vec<f64>) -> GaugeResult<Self> {
        if colors.len() != uppers.len() {
            return Err(GaugeError::PatternMismatch {
                colors: colors.len(),
                thresholds: uppers.len(),
            });
        }
        let bands = colors
            .into_iter()
            .zip(uppers)
            .map(|(color, upper)| Band { color, upper })
            .collect();
        Self::new(min, bands)
    }

    /// Index of the band a value falls in: the first band whose upper
    /// boundary is strictly greater than the value. Values at or past the
    /// last boundary take the last band.
    #[must_use]
    pub fn band_index(&self, value: f64) -> usize {
        self.bands
            .iter()
            .position(|band| value < band.upper)
            .unwrap_or(self.bands.len() - 1)
    }

    /// The band a value falls in.
    #[must_use]
    pub fn band_for(&self, value: f64) -> &Band {
        &self.bands[self.band_index(value)]
    }

    /// The fill color for a value.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Color {
        self.band_for(value).color
    }

    /// Position of a value within the domain, clamped to `[0, 1]`.
    ///
    /// NaN maps to `0.0` so callers never propagate it into geometry.
    #[must_use]
    pub fn ratio(&self, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max() - self.min);
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }

    /// Domain minimum.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Domain maximum (the last band's upper boundary).
    #[must_use]
    pub fn max(&self) -> f64 {
        // Non-empty by construction
        self.bands.last().map_or(self.min, |band| band.upper)
    }

    /// Whether a value lies inside the domain.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max()
    }

    /// The bands in ascending boundary order.
    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}

impl Default for BandScale {
    /// The original four-band percentage scale:
    /// red to 30, orange to 60, yellow to 85, green to 100.
    fn default() -> Self {
        Self {
            min: 0.0,
            bands: vec![
                Band {
                    color: Color::RED,
                    upper: 30.0,
                },
                Band {
                    color: Color::ORANGE,
                    upper: 60.0,
                },
                Band {
                    color: Color::YELLOW,
                    upper: 85.0,
                },
                Band {
                    color: Color::GREEN,
                    upper: 100.0,
                },
            ],
        }
    }
}
