//! Error types for gauge operations.

use thiserror::Error;

/// Result type for gauge operations.
pub type GaugeResult<T> = Result<T, GaugeError>;

/// Errors that can occur in gauge operations.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// A color string could not be parsed as CSS hex notation.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A band scale was constructed with no bands.
    #[error("Band scale has no bands")]
    EmptyScale,

    /// A band scale was constructed with more bands than supported.
    #[error("Too many bands: {0} (max {max})", max = crate::scale::MAX_BANDS)]
    TooManyBands(usize),

    /// Threshold boundaries were not strictly ascending from the domain minimum.
    #[error("Thresholds not strictly ascending: {0}")]
    ThresholdOrder(String),

    /// The color pattern and threshold lists have different lengths.
    #[error("Color pattern has {colors} entries but {thresholds} thresholds")]
    PatternMismatch {
        /// Number of colors in the pattern list.
        colors: usize,
        /// Number of threshold boundaries.
        thresholds: usize,
    },

    /// A reading value lies outside the configured threshold domain.
    #[error("Value {value} outside domain [{min}, {max}]")]
    ValueOutOfRange {
        /// The offending value.
        value: f64,
        /// Domain minimum.
        min: f64,
        /// Domain maximum.
        max: f64,
    },

    /// The gauge label is empty.
    #[error("Gauge label must not be empty")]
    EmptyLabel,

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
