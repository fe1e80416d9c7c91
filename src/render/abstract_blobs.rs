//! Abstract blob renderer — stacks of jittered concentric discs.
//!
//! Each blob is ten rings painted outer-to-inner at a random center. Ring
//! radii shrink steadily but every ring also draws its own jitter factor, so
//! the stack reads as one organic, layered shape rather than a target.

use rand::Rng;
use tracing::{debug, trace};

use crate::basics::{alpha_from, ufloor};
use crate::canvas::Canvas;
use crate::palette::Palette;
use crate::rasterizer::Disc;

/// Alpha scale for blob rings: alpha = 160 × intensity.
pub const ABSTRACT_ALPHA_SCALE: f64 = 160.0;

/// Rings per blob.
pub const BLOB_RINGS: u32 = 10;

/// Number of blobs for a complexity.
pub fn blob_count(complexity: u32) -> u32 {
    3 + complexity / 2
}

/// Outer radius of every blob for a complexity and canvas size.
pub fn blob_max_radius(complexity: u32, width: u32, height: u32) -> u32 {
    ufloor(width.min(height) as f64 * (0.15 + 0.05 * complexity as f64))
}

/// Radius of ring `i` given a uniform draw `u` in `[0, 1)`.
///
/// `max_radius · (1 − i/12) · (0.6 + 0.8u)`: the `1 − i/12` trend shrinks
/// the rings, the jitter spans ×0.6 to ×1.4.
pub fn ring_radius(max_radius: f64, ring: u32, u: f64) -> f64 {
    max_radius * (1.0 - ring as f64 / 12.0) * (0.6 + u * 0.8)
}

/// Paint `blob_count(complexity)` blobs onto `canvas`.
///
/// Draws, per blob: center x, center y, then one jitter value per ring.
/// Returns the number of discs drawn.
pub fn render_abstract<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    palette: &Palette,
    complexity: u32,
    intensity: f64,
    rng: &mut R,
) -> usize {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return 0;
    }
    let blobs = blob_count(complexity);
    let max_radius = blob_max_radius(complexity, w, h) as f64;
    let alpha = alpha_from(ABSTRACT_ALPHA_SCALE, intensity);

    let mut discs = 0;
    for blob in 0..blobs {
        let cx = rng.gen_range(0..w) as f64;
        let cy = rng.gen_range(0..h) as f64;
        trace!(blob, cx, cy, "abstract blob");

        for ring in 0..BLOB_RINGS {
            let rr = ring_radius(max_radius, ring, rng.gen::<f64>());
            let color = palette
                .color_at(ring as f64 / BLOB_RINGS as f64)
                .with_alpha(alpha);
            Disc::new(cx, cy, rr).render(canvas, &color);
            discs += 1;
        }
    }
    debug!(blobs, max_radius, alpha, discs, "rendered abstract blobs");
    discs
}

// ============================================================================
// Tests
// ============================================================================
