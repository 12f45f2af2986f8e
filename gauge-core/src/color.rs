//! RGB colors in CSS hex notation.
//!
//! Band colors arrive as strings like `"#60B044"` in gauge documents and
//! leave the same way, so [`Color`] serializes as its hex form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, GaugeResult};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// First band of the default scale.
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);
    /// Second band of the default scale.
    pub const ORANGE: Self = Self::new(0xF9, 0x76, 0x00);
    /// Third band of the default scale.
    pub const YELLOW: Self = Self::new(0xF6, 0xC6, 0x00);
    /// Fourth band of the default scale.
    pub const GREEN: Self = Self::new(0x60, 0xB0, 0x44);

    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse CSS hex notation: `#RRGGBB` or shorthand `#RGB`.
    ///
    /// Case-insensitive; the leading `#` is required.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::InvalidColor`] for any other form.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_hex(s: &str) -> GaugeResult<Self> {
        let invalid = || GaugeError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Self::new(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ))
            }
            3 => {
                let value = u16::from_str_radix(hex, 16).map_err(|_| invalid())?;
                let expand = |nibble: u16| ((nibble << 4) | nibble) as u8;
                Ok(Self::new(
                    expand((value >> 8) & 0xF),
                    expand((value >> 4) & 0xF),
                    expand(value & 0xF),
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = GaugeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
