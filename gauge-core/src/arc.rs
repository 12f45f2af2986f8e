//! Semicircular arc geometry.
//!
//! The gauge arc sweeps half a turn: from the 9 o'clock position through
//! 12 o'clock to 3 o'clock. Angle 0 points at 12 o'clock and positive
//! angles turn clockwise, so the sweep runs from `-π/2` to `π/2`.

use std::f64::consts::FRAC_PI_2;

/// Angle of the arc start (9 o'clock).
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Angle of the arc end (3 o'clock).
pub const END_ANGLE: f64 = FRAC_PI_2;

/// Angle for a domain ratio in `[0, 1]`, linearly interpolated across the
/// sweep. Out-of-range ratios clamp; NaN behaves as `0`.
#[must_use]
pub fn value_angle(ratio: f64) -> f64 {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    START_ANGLE + ratio * (END_ANGLE - START_ANGLE)
}

/// Point on a circle of `radius` around `(cx, cy)` at `angle`, in the
/// 12-o'clock-zero clockwise convention.
#[must_use]
pub fn arc_point(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}
