//! Foundation types, constants, and rounding helpers.
//!
//! Everything the renderers share at the numeric level lives here: the
//! truncating conversions the geometry formulas are defined in terms of, the
//! coverage type produced by the rasterizer, and channel saturation.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest unsigned integer (round half up).
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Truncate a double toward zero, saturating negatives to 0.
///
/// All derived counts and sizes (spokes, layers, dot radii, alphas) are
/// defined as truncations, so `complexity = 3` gives `3 + 3/2 = 4.5 -> 4`
/// layers, not 5.
#[inline]
pub fn ufloor(v: f64) -> u32 {
    v as u32
}

/// Truncate toward zero as a signed integer.
#[inline]
pub fn itrunc(v: f64) -> i32 {
    v as i32
}

/// Clamp an integer into the 0..=255 channel range.
#[inline]
pub fn saturate_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convert an intensity-scaled alpha (e.g. `180 * intensity`) to a channel
/// value, truncating and clamping. Intensities above 1 are legal input.
#[inline]
pub fn alpha_from(scale: f64, intensity: f64) -> u8 {
    let a = scale * intensity;
    if a.is_nan() || a <= 0.0 {
        0
    } else if a >= 255.0 {
        255
    } else {
        a as u8
    }
}

// ============================================================================
// Cover (anti-aliasing) constants
// ============================================================================

/// The type used for anti-aliasing coverage values.
pub type CoverType = u8;

pub const COVER_SHIFT: u32 = 8;
pub const COVER_SIZE: u32 = 1 << COVER_SHIFT;
pub const COVER_MASK: u32 = COVER_SIZE - 1;
pub const COVER_NONE: CoverType = 0;
pub const COVER_FULL: CoverType = COVER_MASK as CoverType;

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Tests
// ============================================================================
