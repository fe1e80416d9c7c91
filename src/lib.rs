//! # emotion-art
//!
//! Procedural art generator that turns a quantified emotional state into a
//! raster image. The input is a mapping from emotion name to intensity; the
//! dominant emotion picks a color palette, and one of several procedural
//! styles draws with it:
//!
//! - **Mandala** — rings of dots twisting outward from the center
//! - **Abstract** — stacks of jittered concentric blobs at random positions
//! - **Hybrid** — Abstract blobs painted over a Mandala
//! - **Watercolor** — soft washes of the emotion color on grainy paper
//!
//! ## Architecture
//!
//! Data flows one way through four stages:
//!
//! 1. **Palette Selector** — emotion vector → palette + background
//! 2. **Shape Renderers** — mandala / abstract / watercolor geometry
//! 3. **Rasterizer** — anti-aliased discs blended into a pixel buffer
//! 4. **Compositor** — layering and post-processing (blur, noise)
//!
//! Every call owns its canvas and its random generator; a fixed seed makes
//! the output reproducible.
//!
//! ```no_run
//! use emotion_art::{generate_art, EmotionVector, RenderParameters, Style};
//!
//! let emotions = EmotionVector::new([("joy", 0.7), ("neutral", 0.3)])?;
//! let params = RenderParameters::new(Style::Mandala).with_seed(42);
//! let canvas = generate_art(&emotions, &params)?;
//! canvas.save_png("joy.png")?;
//! # Ok::<(), emotion_art::ArtError>(())
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod error;

// Inputs
pub mod config;
pub mod emotion;
pub mod palette;

// Pixel buffers & rasterization
pub mod alpha_mask;
pub mod blur;
pub mod canvas;
pub mod noise;
pub mod pixfmt;
pub mod rasterizer;

// Renderers & orchestration
pub mod generator;
pub mod render;

pub use canvas::Canvas;
pub use color::Rgb8;
pub use config::ArtConfig;
pub use emotion::EmotionVector;
pub use error::{ArtError, Result};
pub use generator::{
    generate_art, generate_art_with_rng, ArtGenerator, Artwork, GenerationStage,
    RenderParameters, Style,
};
pub use palette::{select_palette, Palette, PaletteTable};
pub use pixfmt::PixelFormat;
