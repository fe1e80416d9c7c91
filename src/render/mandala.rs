//! Mandala renderer — concentric rings of dots, twisted a little per ring.

use tracing::{debug, trace};

use crate::basics::{alpha_from, ufloor, PI};
use crate::canvas::Canvas;
use crate::palette::Palette;
use crate::rasterizer::Disc;

/// Alpha scale for mandala dots: alpha = 180 × intensity.
pub const MANDALA_ALPHA_SCALE: f64 = 180.0;

/// Per-ring rotation in radians.
pub const MANDALA_TWIST: f64 = 0.1;

/// Base dot radius before the complexity and ring scaling.
const BASE_DOT_RADIUS: f64 = 30.0;

/// Fraction of the half-size the outermost ring reaches.
const OUTER_RING_FRACTION: f64 = 0.9;

/// Layout of a mandala for a given complexity and canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandalaGeometry {
    pub complexity: u32,
    /// Dots per ring.
    pub spokes: u32,
    /// Number of rings.
    pub layers: u32,
    pub cx: f64,
    pub cy: f64,
    pub max_radius: f64,
}

/// One dot of the mandala.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandalaDot {
    pub layer: u32,
    pub spoke: u32,
    pub disc: Disc,
    /// Position along the palette, `layer / layers`.
    pub t: f64,
}

impl MandalaGeometry {
    pub fn new(complexity: u32, width: u32, height: u32) -> Self {
        let c = complexity as f64;
        let cx = width / 2;
        let cy = height / 2;
        Self {
            complexity,
            spokes: ufloor(4.0 + c * 2.0),
            layers: ufloor(3.0 + c / 2.0),
            cx: cx as f64,
            cy: cy as f64,
            max_radius: cx.min(cy) as f64 * OUTER_RING_FRACTION,
        }
    }

    /// Ring radius of `layer`.
    pub fn ring_radius(&self, layer: u32) -> f64 {
        self.max_radius * (layer + 1) as f64 / self.layers as f64
    }

    /// Dot radius on `layer`; dots shrink from the center outward.
    pub fn dot_radius(&self, layer: u32) -> u32 {
        let c = self.complexity as f64;
        let shrink = 1.0 - layer as f64 / self.layers as f64;
        ufloor(BASE_DOT_RADIUS * (1.0 + c / 5.0) * shrink)
    }

    /// Every dot, ring by ring from the center outward.
    pub fn dots(&self) -> impl Iterator<Item = MandalaDot> + '_ {
        (0..self.layers).flat_map(move |layer| {
            let r = self.ring_radius(layer);
            let size = self.dot_radius(layer) as f64;
            let t = layer as f64 / self.layers as f64;
            (0..self.spokes).map(move |spoke| {
                let angle =
                    2.0 * PI * spoke as f64 / self.spokes as f64 + layer as f64 * MANDALA_TWIST;
                MandalaDot {
                    layer,
                    spoke,
                    disc: Disc::new(self.cx + r * angle.cos(), self.cy + r * angle.sin(), size),
                    t,
                }
            })
        })
    }
}

/// Draw a mandala onto `canvas`.
///
/// `intensity` is the dominant emotion's own intensity. Uses no randomness,
/// so the output depends only on the arguments. Returns the number of dots
/// drawn.
pub fn render_mandala(canvas: &mut Canvas, palette: &Palette, complexity: u32, intensity: f64) -> usize {
    let (w, h) = canvas.dimensions();
    let geometry = MandalaGeometry::new(complexity, w, h);
    let alpha = alpha_from(MANDALA_ALPHA_SCALE, intensity);

    let mut dots = 0;
    for dot in geometry.dots() {
        let color = palette.color_at(dot.t).with_alpha(alpha);
        let covered = dot.disc.render(canvas, &color);
        trace!(layer = dot.layer, spoke = dot.spoke, r = dot.disc.r, covered, "mandala dot");
        dots += 1;
    }
    debug!(
        spokes = geometry.spokes,
        layers = geometry.layers,
        alpha,
        dots,
        "rendered mandala"
    );
    dots
}

// ============================================================================
// Tests
// ============================================================================
