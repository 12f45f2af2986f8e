//! The measured quantity a gauge displays.

use serde::{Deserialize, Serialize};

/// A labeled numeric measurement, e.g. `("Accuracy", 86.25)`.
///
/// The reading itself carries no domain constraints; whether the value lies
/// inside a scale's threshold domain is checked where reading and scale meet
/// ([`crate::GaugeSpec::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Display label for the measurement.
    pub label: String,
    /// Measured value, nominally a percentage in `[0, 100]`.
    pub value: f64,
}

impl Reading {
    /// Create a new reading.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// The same measurement with a fresh value.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            label: self.label.clone(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_value_keeps_label() {
        let reading = Reading::new("Accuracy", 86.25);
        let updated = reading.with_value(42.0);
        assert_eq!(updated.label, "Accuracy");
        assert!((updated.value - 42.0).abs() < f64::EPSILON);
        // Original unchanged
        assert!((reading.value - 86.25).abs() < f64::EPSILON);
    }
}
