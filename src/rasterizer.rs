//! Anti-aliased disc rasterizer.
//!
//! Every shape the renderers draw is a filled circle. A [`Disc`] is converted
//! to horizontal spans of coverage values, one span per scanline, clipped to
//! the target's box, and handed to [`PixelFormat::blend_solid_hspan`].
//!
//! Coverage is the distance-to-edge approximation: a pixel whose center lies
//! `d` from the disc center gets `clamp(r + 0.5 - d, 0, 1)`. Pixel (x, y)
//! spans `[x, x + 1) × [y, y + 1)`, so its center is at `(x + 0.5, y + 0.5)`.

use crate::basics::{ifloor, uround, CoverType, COVER_FULL, COVER_NONE};
use crate::pixfmt::PixelFormat;

/// A filled circle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Disc {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    /// True when the disc has no area or a non-finite coordinate.
    pub fn is_degenerate(&self) -> bool {
        !(self.r > 0.0 && self.cx.is_finite() && self.cy.is_finite() && self.r.is_finite())
    }

    /// Blend the disc into `pf` with color `c`.
    ///
    /// Returns the number of pixels that received non-zero coverage; the
    /// parts outside the target are clipped away.
    pub fn render<P: PixelFormat>(&self, pf: &mut P, c: &P::ColorType) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        let w = pf.width() as i32;
        let h = pf.height() as i32;
        if w == 0 || h == 0 {
            return 0;
        }

        let reach = self.r + 0.5;
        let y0 = ifloor(self.cy - reach).max(0);
        let y1 = ifloor(self.cy + reach).min(h - 1);

        let mut covers: Vec<CoverType> = Vec::new();
        let mut painted = 0;
        for y in y0..=y1 {
            let dy = y as f64 + 0.5 - self.cy;
            let half2 = reach * reach - dy * dy;
            if half2 <= 0.0 {
                continue;
            }
            let half = half2.sqrt();
            let x0 = ifloor(self.cx - half).max(0);
            let x1 = ifloor(self.cx + half).min(w - 1);
            if x0 > x1 {
                continue;
            }

            covers.clear();
            covers.extend((x0..=x1).map(|x| {
                let dx = x as f64 + 0.5 - self.cx;
                self.cover_at((dx * dx + dy * dy).sqrt())
            }));
            painted += covers.iter().filter(|&&c| c != COVER_NONE).count();

            // Fully covered pixels form one run in the middle of a disc row.
            let first = covers.iter().position(|&c| c == COVER_FULL);
            let last = covers.iter().rposition(|&c| c == COVER_FULL);
            match (first, last) {
                (Some(a), Some(b)) => {
                    if a > 0 {
                        pf.blend_solid_hspan(x0, y, a as u32, c, &covers[..a]);
                    }
                    pf.blend_hline(x0 + a as i32, y, (b - a + 1) as u32, c, COVER_FULL);
                    if b + 1 < covers.len() {
                        let tail = &covers[b + 1..];
                        pf.blend_solid_hspan(x0 + b as i32 + 1, y, tail.len() as u32, c, tail);
                    }
                }
                _ => pf.blend_solid_hspan(x0, y, covers.len() as u32, c, &covers),
            }
        }
        painted
    }

    #[inline]
    fn cover_at(&self, dist: f64) -> CoverType {
        let v = self.r + 0.5 - dist;
        if v >= 1.0 {
            COVER_FULL
        } else if v <= 0.0 {
            COVER_NONE
        } else {
            uround(v * COVER_FULL as f64) as CoverType
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
