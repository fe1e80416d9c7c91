//! RGB canvas — the accumulation target every renderer draws into.
//!
//! A `Canvas` is an owned RGB24 buffer (3 bytes per pixel, no alpha). It is
//! created fresh for each generation, lent out by `&mut` to one renderer at a
//! time, and returned by value as the result image.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::alpha_mask::AlphaMask;
use crate::basics::CoverType;
use crate::color::{Rgb8, Rgba8};
use crate::error::{ArtError, Result};
use crate::pixfmt::PixelFormat;

const BPP: usize = 3; // bytes per pixel

/// Owned RGB24 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb8) -> Self {
        let mut canvas = Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        };
        canvas.clear(background);
        canvas
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clear the entire canvas to a solid color.
    pub fn clear(&mut self, c: Rgb8) {
        for p in self.data.chunks_exact_mut(BPP) {
            p.copy_from_slice(&c.channels());
        }
    }

    /// Get the pixel color at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        let off = self.pixel_offset(x as i32, y as i32);
        Rgb8::new(self.data[off], self.data[off + 1], self.data[off + 2])
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.data
            .chunks_exact(BPP)
            .map(|p| Rgb8::new(p[0], p[1], p[2]))
    }

    /// Number of pixels whose color differs from `background`.
    pub fn count_non_background(&self, background: Rgb8) -> usize {
        self.pixels().filter(|&p| p != background).count()
    }

    /// Mean and standard deviation over every channel value.
    pub fn channel_stats(&self) -> ChannelStats {
        let n = self.data.len() as f64;
        if n == 0.0 {
            return ChannelStats::default();
        }
        let mean = self.data.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        ChannelStats {
            mean,
            std_dev: var.sqrt(),
        }
    }

    /// Alpha-composite `color` through `mask` with the mask's top-left corner
    /// at (x0, y0). Parts of the mask outside the canvas are dropped.
    pub fn composite_mask(&mut self, mask: &AlphaMask, x0: i32, y0: i32, color: Rgb8) {
        let w = self.width as i32;
        let h = self.height as i32;
        let mw = mask.width() as i32;
        let mh = mask.height() as i32;

        let sx = (-x0).max(0);
        let sy = (-y0).max(0);
        let ex = mw.min(w - x0);
        let ey = mh.min(h - y0);
        if sx >= ex || sy >= ey {
            return;
        }

        for my in sy..ey {
            for mx in sx..ex {
                let alpha = mask.value(mx as u32, my as u32);
                if alpha == 0 {
                    continue;
                }
                let off = self.pixel_offset(x0 + mx, y0 + my);
                let p = &mut self.data[off..off + BPP];
                p[0] = Rgba8::lerp(p[0], color.r, alpha);
                p[1] = Rgba8::lerp(p[1], color.g, alpha);
                p[2] = Rgba8::lerp(p[2], color.b, alpha);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy into an `image::RgbImage`.
    pub fn to_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            ArtError::InvalidSize {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image()?
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }

    /// Blend a single pixel (internal helper, no bounds checking).
    #[inline]
    fn blend_pix(p: &mut [u8], c: &Rgba8, alpha: u8) {
        p[0] = Rgba8::lerp(p[0], c.r, alpha);
        p[1] = Rgba8::lerp(p[1], c.g, alpha);
        p[2] = Rgba8::lerp(p[2], c.b, alpha);
    }
}

impl PixelFormat for Canvas {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pix_width(&self) -> usize {
        BPP
    }

    fn buf(&self) -> &[u8] {
        &self.data
    }

    fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType) {
        let alpha = Rgba8::mult_cover(c.a, cover);
        if alpha == 0 {
            return;
        }
        let start = self.pixel_offset(x, y);
        let row = &mut self.data[start..start + len as usize * BPP];
        for p in row.chunks_exact_mut(BPP) {
            if alpha == 255 {
                p.copy_from_slice(&[c.r, c.g, c.b]);
            } else {
                Self::blend_pix(p, c, alpha);
            }
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        let start = self.pixel_offset(x, y);
        let row = &mut self.data[start..start + len as usize * BPP];
        for (p, &cov) in row.chunks_exact_mut(BPP).zip(covers) {
            let alpha = Rgba8::mult_cover(c.a, cov);
            if alpha == 255 {
                p.copy_from_slice(&[c.r, c.g, c.b]);
            } else if alpha > 0 {
                Self::blend_pix(p, c, alpha);
            }
        }
    }
}

/// Summary statistics of a canvas' channel values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelStats {
    pub mean: f64,
    pub std_dev: f64,
}

// ============================================================================
// Tests
// ============================================================================
