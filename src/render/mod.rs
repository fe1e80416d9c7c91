//! Shape renderers.
//!
//! Mandala and Abstract are layers: they draw onto a canvas they are lent and
//! can be stacked (Hybrid paints Abstract over Mandala). Watercolor is a
//! standalone pipeline that builds and post-processes its own canvas.

mod abstract_blobs;
mod mandala;
mod watercolor;

pub use abstract_blobs::*;
pub use mandala::*;
pub use watercolor::*;
