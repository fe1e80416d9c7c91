//! Color types and operations.
//!
//! - `Rgb8` — opaque 8-bit color, the unit palettes are made of
//! - `Rgba8` — `Rgb8` plus an alpha channel, what the renderers blend with
//!
//! Palette colors travel as `#RRGGBB` strings at the edges (config files,
//! CLI output); inside the crate they are always parsed `Rgb8` values.

use std::fmt;
use std::str::FromStr;

use crate::basics::CoverType;
use crate::error::{ArtError, Result};

// ============================================================================
// Rgb8
// ============================================================================

/// Opaque RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color, `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ArtError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ArtError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Upper-case `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    pub fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, a)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// ============================================================================
// Rgba8
// ============================================================================

/// RGBA color with u8 components, non-premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fixed-point multiply, exact over u8.
    /// `(a * b + 128) >> 8`, with rounding correction.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Multiply a color component by a cover.
    #[inline]
    pub fn mult_cover(a: u8, b: CoverType) -> u8 {
        Self::multiply(a, b)
    }

    /// Interpolate p to q by a.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgb8::from_hex("#FFD166").unwrap();
        assert_eq!(c, Rgb8::new(0xFF, 0xD1, 0x66));
        let c = Rgb8::from_hex("0f172a").unwrap();
        assert_eq!(c, Rgb8::new(0x0F, 0x17, 0x2A));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "#FFF", "#FFD16", "#FFD1666", "#GGGGGG", "#+1+1+1"] {
            assert!(
                matches!(Rgb8::from_hex(bad), Err(ArtError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_is_upper_hex() {
        assert_eq!(Rgb8::new(0xc4, 0xfc, 0xef).to_string(), "#C4FCEF");
        assert_eq!(Rgb8::new(0, 0x77, 0xb6).to_hex(), "#0077B6");
    }

    #[test]
    fn test_parse_via_from_str() {
        let c: Rgb8 = "#EF476F".parse().unwrap();
        assert_eq!(c.channels(), [0xEF, 0x47, 0x6F]);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Rgba8::multiply(255, 255), 255);
        assert_eq!(Rgba8::multiply(255, 0), 0);
        assert_eq!(Rgba8::multiply(128, 255), 128);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(Rgba8::lerp(0, 255, 255), 255);
        assert_eq!(Rgba8::lerp(0, 255, 0), 0);
        assert_eq!(Rgba8::lerp(100, 200, 128), 150);
        assert_eq!(Rgba8::lerp(200, 100, 128), 150);
    }

    #[test]
    fn test_with_alpha() {
        let c = Rgb8::new(1, 2, 3).with_alpha(4);
        assert_eq!(c, Rgba8::new(1, 2, 3, 4));
    }
}
