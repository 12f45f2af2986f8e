//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested output size leaves no room to draw.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// SVG composition or parsing failed.
    #[error("SVG error: {0}")]
    Svg(String),

    /// Encoding to an output format failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// The gauge itself is invalid.
    #[error("Gauge error: {0}")]
    Core(#[from] gauge_core::GaugeError),
}
