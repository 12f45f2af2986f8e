//! Input validation for untrusted data.
//!
//! All user-supplied input MUST be validated before use.
//! This module provides validators for gauge ids, document fields, and
//! render parameters.

use thiserror::Error;

/// Maximum length for gauge ids.
pub const MAX_GAUGE_ID_LEN: usize = 64;
/// Maximum length for gauge labels.
pub const MAX_LABEL_LEN: usize = 256;
/// Maximum length for the units suffix rendered after the value.
pub const MAX_UNITS_LEN: usize = 16;
/// Maximum render dimension in pixels, per axis, before scaling.
pub const MAX_RENDER_DIM: u32 = 4096;
/// Maximum render dimension in pixels after applying the scale factor.
pub const MAX_SCALED_DIM: f64 = 8192.0;
/// Maximum render scale factor.
pub const MAX_RENDER_SCALE: f64 = 8.0;

/// Validation error types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Gauge ID exceeds maximum length.
    #[error("gauge_id too long (max {MAX_GAUGE_ID_LEN} chars)")]
    GaugeIdTooLong,
    /// Gauge ID contains invalid characters.
    #[error("gauge_id contains invalid characters")]
    GaugeIdInvalidChars,
    /// Label exceeds maximum length.
    #[error("label too long (max {MAX_LABEL_LEN} chars)")]
    LabelTooLong,
    /// Units suffix exceeds maximum length.
    #[error("units too long (max {MAX_UNITS_LEN} chars)")]
    UnitsTooLong,
    /// Render dimension outside the accepted range.
    #[error("dimension {0} out of range (1-{MAX_RENDER_DIM})")]
    DimensionOutOfRange(u32),
    /// Scale factor outside the accepted range.
    #[error("scale {0} out of range (0-{MAX_RENDER_SCALE}]")]
    ScaleOutOfRange(f64),
    /// Scaled output would exceed the maximum render size.
    #[error("scaled output larger than {MAX_SCALED_DIM} pixels per axis")]
    ScaledOutputTooLarge,
    /// JPEG quality outside 1-100.
    #[error("quality {0} out of range (1-100)")]
    QualityOutOfRange(u8),
}

/// Check if a character is valid for ids (alphanumeric, hyphen, or underscore).
fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Validate a gauge id.
///
/// Valid gauge ids:
/// - 1-64 characters
/// - Alphanumeric, hyphen, underscore only
///
/// # Errors
///
/// Returns [`ValidationError::GaugeIdTooLong`] if the id exceeds 64 characters.
/// Returns [`ValidationError::GaugeIdInvalidChars`] if the id is empty or contains invalid characters.
pub fn validate_gauge_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_GAUGE_ID_LEN {
        return Err(ValidationError::GaugeIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::GaugeIdInvalidChars);
    }
    Ok(())
}

/// Validate a gauge label length.
///
/// Empty labels are rejected later by gauge admission; this only bounds
/// the size of what a request can carry.
///
/// # Errors
///
/// Returns [`ValidationError::LabelTooLong`] if the label exceeds 256 characters.
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong);
    }
    Ok(())
}

/// Validate a units suffix length.
///
/// # Errors
///
/// Returns [`ValidationError::UnitsTooLong`] if the units exceed 16 characters.
pub fn validate_units(units: &str) -> Result<(), ValidationError> {
    if units.chars().count() > MAX_UNITS_LEN {
        return Err(ValidationError::UnitsTooLong);
    }
    Ok(())
}

/// Validate a single render dimension.
///
/// # Errors
///
/// Returns [`ValidationError::DimensionOutOfRange`] if the dimension is zero
/// or exceeds [`MAX_RENDER_DIM`].
pub fn validate_dimension(dim: u32) -> Result<(), ValidationError> {
    if dim == 0 || dim > MAX_RENDER_DIM {
        return Err(ValidationError::DimensionOutOfRange(dim));
    }
    Ok(())
}

/// Validate a render scale factor.
///
/// # Errors
///
/// Returns [`ValidationError::ScaleOutOfRange`] if the scale is not finite,
/// not positive, or exceeds [`MAX_RENDER_SCALE`].
pub fn validate_scale(scale: f64) -> Result<(), ValidationError> {
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_RENDER_SCALE {
        return Err(ValidationError::ScaleOutOfRange(scale));
    }
    Ok(())
}

/// Validate JPEG quality.
///
/// # Errors
///
/// Returns [`ValidationError::QualityOutOfRange`] if the quality is outside 1-100.
pub fn validate_quality(quality: u8) -> Result<(), ValidationError> {
    if quality == 0 || quality > 100 {
        return Err(ValidationError::QualityOutOfRange(quality));
    }
    Ok(())
}

/// Validate the full set of render parameters for one export.
///
/// Checks each dimension, the scale factor, and that the scaled output
/// stays under the size cap on both axes.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_render_size(width: u32, height: u32, scale: f64) -> Result<(), ValidationError> {
    validate_dimension(width)?;
    validate_dimension(height)?;
    validate_scale(scale)?;
    if f64::from(width) * scale > MAX_SCALED_DIM || f64::from(height) * scale > MAX_SCALED_DIM {
        return Err(ValidationError::ScaledOutputTooLarge);
    }
    Ok(())
}
