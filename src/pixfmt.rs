//! Pixel format abstraction.
//!
//! The rasterizer and the blur filters are written against [`PixelFormat`]
//! so the same disc and blur code fills both the RGB [`Canvas`] and the
//! single-channel [`AlphaMask`] used for watercolor patches.
//!
//! [`Canvas`]: crate::canvas::Canvas
//! [`AlphaMask`]: crate::alpha_mask::AlphaMask

use crate::basics::CoverType;

/// A rectangular, owned, tightly packed pixel buffer that colors can be
/// blended into.
///
/// Span coordinates passed to the blend methods are already clipped by the
/// caller: `0 <= x`, `x + len <= width`, `0 <= y < height`.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Bytes per pixel.
    fn pix_width(&self) -> usize;

    /// Raw pixel bytes, row-major, `width * pix_width()` bytes per row.
    fn buf(&self) -> &[u8];
    fn buf_mut(&mut self) -> &mut [u8];

    /// Blend a horizontal line of `len` pixels at (x, y) with uniform color and coverage.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal span of `len` pixels with per-pixel coverage values.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    );

    /// Byte offset of pixel (x, y).
    #[inline]
    fn pixel_offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width() as usize + x as usize) * self.pix_width()
    }
}
