//! Canonical serialized representation of a gauge.
//!
//! The document keeps the section layout of the original configuration
//! artifact, so a config written for it parses unchanged:
//!
//! ```json
//! {
//!   "data":  { "label": "Accuracy", "value": 86.25 },
//!   "color": {
//!     "pattern": ["#FF0000", "#F97600", "#F6C600", "#60B044"],
//!     "threshold": { "values": [30, 60, 85, 100] }
//!   },
//!   "size":  { "height": 250 }
//! }
//! ```
//!
//! Omitted `color` and `size` sections fall back to the original values.
//! Documents are the untrusted boundary: [`GaugeDocument::into_spec`]
//! validates while materializing.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::GaugeResult;
use crate::reading::Reading;
use crate::scale::BandScale;
use crate::spec::{GaugeSize, GaugeSpec, DEFAULT_UNITS};

/// The `data` section: the labeled measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataDocument {
    /// Display label.
    pub label: String,
    /// Measured value.
    pub value: f64,
}

/// The `color.threshold` section: band boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdDocument {
    /// Ascending upper boundaries, one per color.
    #[serde(default = "ThresholdDocument::default_values")]
    pub values: Vec<f64>,
    /// Domain minimum.
    #[serde(default)]
    pub min: f64,
}

impl ThresholdDocument {
    fn default_values() -> Vec<f64> {
        vec![30.0, 60.0, 85.0, 100.0]
    }
}

impl Default for ThresholdDocument {
    fn default() -> Self {
        Self {
            values: Self::default_values(),
            min: 0.0,
        }
    }
}

/// The `color` section: band colors and their boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDocument {
    /// Band fill colors in ascending band order.
    #[serde(default = "ColorDocument::default_pattern")]
    pub pattern: Vec<Color>,
    /// Threshold boundaries.
    #[serde(default)]
    pub threshold: ThresholdDocument,
}

impl ColorDocument {
    fn default_pattern() -> Vec<Color> {
        vec![Color::RED, Color::ORANGE, Color::YELLOW, Color::GREEN]
    }
}

impl Default for ColorDocument {
    fn default() -> Self {
        Self {
            pattern: Self::default_pattern(),
            threshold: ThresholdDocument::default(),
        }
    }
}

/// The `size` section: rendered dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeDocument {
    /// Optional explicit width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Rendering height.
    #[serde(default = "SizeDocument::default_height")]
    pub height: u32,
}

impl SizeDocument {
    const fn default_height() -> u32 {
        GaugeSize::DEFAULT_HEIGHT
    }
}

impl Default for SizeDocument {
    fn default() -> Self {
        Self {
            width: None,
            height: Self::default_height(),
        }
    }
}

/// Canonical gauge document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeDocument {
    /// The labeled measurement.
    pub data: DataDocument,
    /// Band colors and thresholds.
    #[serde(default)]
    pub color: ColorDocument,
    /// Rendered dimensions.
    #[serde(default)]
    pub size: SizeDocument,
    /// Units suffix for the value text.
    #[serde(default = "GaugeDocument::default_units")]
    pub units: String,
}

impl GaugeDocument {
    fn default_units() -> String {
        DEFAULT_UNITS.to_string()
    }

    /// Build the canonical document for a gauge.
    #[must_use]
    pub fn from_spec(spec: &GaugeSpec) -> Self {
        Self {
            data: DataDocument {
                label: spec.reading.label.clone(),
                value: spec.reading.value,
            },
            color: ColorDocument {
                pattern: spec.scale.bands().iter().map(|band| band.color).collect(),
                threshold: ThresholdDocument {
                    values: spec.scale.bands().iter().map(|band| band.upper).collect(),
                    min: spec.scale.min(),
                },
            },
            size: SizeDocument {
                width: spec.size.width,
                height: spec.size.height,
            },
            units: spec.units.clone(),
        }
    }

    /// Materialize and validate the runtime gauge this document describes.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern and threshold lists cannot form a
    /// [`BandScale`], or when the reading fails [`GaugeSpec::validate`].
    pub fn into_spec(self) -> GaugeResult<GaugeSpec> {
        let scale = BandScale::from_parts(
            self.color.threshold.min,
            self.color.pattern,
            self.color.threshold.values,
        )?;
        let spec = GaugeSpec::new(Reading::new(self.data.label, self.data.value), scale)
            .with_size(GaugeSize {
                width: self.size.width,
                height: self.size.height,
            })
            .with_units(self.units);
        spec.validate()?;
        Ok(spec)
    }
}
