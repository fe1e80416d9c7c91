//! Watercolor renderer — a standalone, fully stochastic pipeline.
//!
//! Unlike the layer renderers this one owns its canvas: it starts from white
//! paper, lays down soft patches of the emotion color, adds paper grain, and
//! softens the result. Style selection sends a request either here or to the
//! layer renderers, never both.

use std::ops::Range;

use rand::Rng;
use tracing::{debug, trace};

use crate::alpha_mask::AlphaMask;
use crate::basics::{itrunc, PI};
use crate::blur::{box_blur, gaussian_blur};
use crate::canvas::Canvas;
use crate::color::Rgb8;
use crate::emotion::EmotionVector;
use crate::noise::add_gaussian_noise;
use crate::palette::{select_palette, Palette};
use crate::rasterizer::Disc;

/// Patches laid down per unit of complexity.
pub const STROKES_PER_COMPLEXITY: u32 = 30;

/// Patch radius range in pixels (end exclusive).
pub const PATCH_RADIUS: Range<u32> = 30..110;

/// Patch alpha range before color-intensity scaling (end exclusive).
pub const PATCH_ALPHA: Range<u32> = 40..160;

/// Box blur radius applied to each patch before compositing.
pub const PATCH_BLUR_RADIUS: u32 = 10;

/// Standard deviation of the paper-grain noise.
pub const PAPER_GRAIN_SIGMA: f64 = 25.0;

/// Standard deviation of the final softening blur.
pub const SOFTEN_SIGMA: f64 = 1.0;

/// Color intensity at which patch alphas are used unscaled.
pub const NEUTRAL_COLOR_INTENSITY: u32 = 6;

/// Scale a drawn patch alpha by `color_intensity / 6`, saturating at 255.
pub fn scaled_patch_alpha(alpha: u32, color_intensity: u32) -> u8 {
    (alpha.saturating_mul(color_intensity) / NEUTRAL_COLOR_INTENSITY).min(255) as u8
}

/// Render a watercolor wash for `emotions` using DefaultPalettes.
pub fn render_watercolor<R: Rng + ?Sized>(
    emotions: &EmotionVector,
    complexity: u32,
    color_intensity: u32,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Canvas {
    let palette = select_palette(emotions);
    render_watercolor_with_palette(&palette, complexity, color_intensity, width, height, rng)
}

/// Render a watercolor wash in `palette.primary()`.
///
/// Per patch the generator is drawn for: angle, distance, radius, alpha, in
/// that order; the noise pass follows. Patch centers are placed at a uniform
/// angle and a uniform *distance* within `min(w, h) / 3` of the center, which
/// piles patches toward the middle (area grows with r²).
pub fn render_watercolor_with_palette<R: Rng + ?Sized>(
    palette: &Palette,
    complexity: u32,
    color_intensity: u32,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Canvas {
    let color = palette.primary();
    let mut canvas = Canvas::new(width, height, Rgb8::WHITE);

    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let spread = (width.min(height) / 3) as f64;
    let strokes = complexity.saturating_mul(STROKES_PER_COMPLEXITY);

    for stroke in 0..strokes {
        let angle = rng.gen::<f64>() * 2.0 * PI;
        let distance = rng.gen::<f64>() * spread;
        let x = itrunc(cx + distance * angle.cos());
        let y = itrunc(cy + distance * angle.sin());

        let radius = rng.gen_range(PATCH_RADIUS);
        let alpha = scaled_patch_alpha(rng.gen_range(PATCH_ALPHA), color_intensity);
        trace!(stroke, x, y, radius, alpha, "watercolor patch");

        let patch = soft_patch(radius, alpha);
        let r = radius as i32;
        canvas.composite_mask(&patch, x - r, y - r, color);
    }

    add_gaussian_noise(&mut canvas, PAPER_GRAIN_SIGMA, rng);
    gaussian_blur(&mut canvas, SOFTEN_SIGMA);

    debug!(strokes, color = %color, width, height, "rendered watercolor");
    canvas
}

/// A `2r × 2r` mask holding a disc of radius `r` at `alpha`, box-blurred.
fn soft_patch(radius: u32, alpha: u8) -> AlphaMask {
    let size = radius * 2;
    let mut mask = AlphaMask::new(size, size);
    let r = radius as f64;
    Disc::new(r, r, r).render(&mut mask, &alpha);
    box_blur(&mut mask, PATCH_BLUR_RADIUS);
    mask
}

// ============================================================================
// Tests
// ============================================================================
