//! Single-channel alpha buffer.
//!
//! Watercolor patches are rendered off-canvas as pure coverage: a disc of
//! constant alpha is filled into an `AlphaMask`, blurred, and then used as the
//! mask when compositing the emotion color onto the canvas.

use crate::basics::CoverType;
use crate::color::Rgba8;
use crate::pixfmt::PixelFormat;

/// Owned 8-bit alpha buffer, zero (fully transparent) when created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Mask value at (x, y).
    pub fn value(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Largest value in the mask.
    pub fn max_value(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

/// Blending into a mask moves each value toward the target level by the
/// coverage, so a fully covered pixel takes the level exactly.
impl PixelFormat for AlphaMask {
    type ColorType = u8;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pix_width(&self) -> usize {
        1
    }

    fn buf(&self) -> &[u8] {
        &self.data
    }

    fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &u8, cover: CoverType) {
        let start = self.pixel_offset(x, y);
        for p in &mut self.data[start..start + len as usize] {
            *p = Rgba8::lerp(*p, *c, cover);
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &u8, covers: &[CoverType]) {
        let start = self.pixel_offset(x, y);
        for (p, &cov) in self.data[start..start + len as usize].iter_mut().zip(covers) {
            *p = Rgba8::lerp(*p, *c, cov);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let m = AlphaMask::new(5, 4);
        assert_eq!(m.buf().len(), 20);
        assert_eq!(m.max_value(), 0);
    }

    #[test]
    fn test_full_cover_takes_level() {
        let mut m = AlphaMask::new(4, 1);
        m.blend_hline(0, 0, 4, &140, 255);
        assert_eq!(m.value(0, 0), 140);
        assert_eq!(m.value(3, 0), 140);
    }

    #[test]
    fn test_partial_cover() {
        let mut m = AlphaMask::new(3, 1);
        m.blend_solid_hspan(0, 0, 3, &200, &[0, 128, 255]);
        assert_eq!(m.value(0, 0), 0);
        assert_eq!(m.value(1, 0), 100);
        assert_eq!(m.value(2, 0), 200);
    }
}
