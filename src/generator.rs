//! Art generator — the top-level entry point.
//!
//! A generation walks a fixed sequence of stages:
//!
//! ```text
//! Idle -> Seeding -> PaletteResolved -> Rendering -> PostProcessing -> Done
//!                 \-> Rendering (watercolor) -> Done
//! ```
//!
//! Seeding builds a random generator private to the call, so concurrent
//! generations never share random state. Watercolor short-circuits to its own
//! pipeline; the other styles draw Mandala and/or Abstract layers onto one
//! canvas filled with the palette background and finish with a light blur.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::blur::gaussian_blur;
use crate::canvas::Canvas;
use crate::emotion::EmotionVector;
use crate::error::{ArtError, Result};
use crate::palette::{Palette, PaletteTable};
use crate::render::{render_abstract, render_mandala, render_watercolor_with_palette};

/// Standard deviation of the blur applied after the layer renderers.
pub const FINAL_SOFTEN_SIGMA: f64 = 0.6;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 8192;

/// Largest accepted complexity.
pub const MAX_COMPLEXITY: u32 = 100;

// ============================================================================
// Style
// ============================================================================

/// Rendering style, resolved once at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Style {
    Mandala,
    Abstract,
    Watercolor,
    /// Mandala with Abstract blobs painted on top.
    #[default]
    Hybrid,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Hybrid, Style::Mandala, Style::Abstract, Style::Watercolor];

    pub fn draws_mandala(self) -> bool {
        matches!(self, Style::Mandala | Style::Hybrid)
    }

    pub fn draws_abstract(self) -> bool {
        matches!(self, Style::Abstract | Style::Hybrid)
    }

    pub fn is_watercolor(self) -> bool {
        self == Style::Watercolor
    }

    pub fn label(self) -> &'static str {
        match self {
            Style::Mandala => "Mandala",
            Style::Abstract => "Abstract",
            Style::Watercolor => "Watercolor",
            Style::Hybrid => "Hybrid (Mandala+Abstract)",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Style {
    type Err = ArtError;

    /// Case-insensitive; accepts the display labels and the bare names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mandala" => Ok(Style::Mandala),
            "abstract" => Ok(Style::Abstract),
            "watercolor" => Ok(Style::Watercolor),
            "hybrid" | "hybrid (mandala+abstract)" | "mandala+abstract" => Ok(Style::Hybrid),
            _ => Err(ArtError::UnknownStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for Style {
    type Error = ArtError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Style> for String {
    fn from(s: Style) -> Self {
        s.label().to_string()
    }
}

// ============================================================================
// RenderParameters
// ============================================================================

/// Everything besides the emotions that shapes one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderParameters {
    pub style: Style,
    /// Shape count and density knob, calibrated for 1..=10.
    pub complexity: u32,
    /// Watercolor patch opacity knob, calibrated for 1..=10 (6 = unscaled).
    pub color_intensity: u32,
    /// Fixed seed for reproducible output; `None` draws a fresh one.
    pub seed: Option<u64>,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            style: Style::Hybrid,
            complexity: 5,
            color_intensity: 6,
            seed: None,
            width: 1024,
            height: 1024,
        }
    }
}

impl RenderParameters {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_color_intensity(mut self, color_intensity: u32) -> Self {
        self.color_intensity = color_intensity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check the output size is within `1..=MAX_DIMENSION` on both axes and
    /// the complexity within `0..=MAX_COMPLEXITY`.
    pub fn validate(&self) -> Result<()> {
        if self.complexity > MAX_COMPLEXITY {
            return Err(ArtError::InvalidComplexity(self.complexity));
        }
        let ok = |d: u32| (1..=MAX_DIMENSION).contains(&d);
        if !ok(self.width) || !ok(self.height) {
            return Err(ArtError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Generation stages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    Seeding,
    PaletteResolved,
    Rendering,
    PostProcessing,
    Done,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationStage::Idle => "idle",
            GenerationStage::Seeding => "seeding",
            GenerationStage::PaletteResolved => "palette-resolved",
            GenerationStage::Rendering => "rendering",
            GenerationStage::PostProcessing => "post-processing",
            GenerationStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Records the stages a generation passed through.
struct StageLog {
    stages: Vec<GenerationStage>,
}

impl StageLog {
    fn new() -> Self {
        Self {
            stages: vec![GenerationStage::Idle],
        }
    }

    fn enter(&mut self, stage: GenerationStage) {
        debug!(%stage, "generation stage");
        self.stages.push(stage);
    }
}

// ============================================================================
// Artwork
// ============================================================================

/// A generated image plus what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub canvas: Canvas,
    pub palette: Palette,
    pub dominant: String,
    pub style: Style,
    /// Seed the generator was built from; `None` when the caller supplied
    /// the random generator.
    pub seed: Option<u64>,
    pub stages: Vec<GenerationStage>,
}

impl Artwork {
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

// ============================================================================
// ArtGenerator
// ============================================================================

/// Turns emotion vectors into images using a palette table.
#[derive(Debug, Clone, Default)]
pub struct ArtGenerator {
    palettes: PaletteTable,
}

impl ArtGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palettes(palettes: PaletteTable) -> Self {
        Self { palettes }
    }

    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }

    /// Generate with a generator seeded from `params.seed`, or from a fresh
    /// seed when none is given. The seed used is reported in the result.
    pub fn generate(&self, emotions: &EmotionVector, params: &RenderParameters) -> Result<Artwork> {
        params.validate()?;
        let seed = match params.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                debug!(seed, "no seed supplied, drew one");
                seed
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut art = self.run(emotions, params, &mut rng);
        art.seed = Some(seed);
        Ok(art)
    }

    /// Generate with a caller-supplied random generator; `params.seed` is
    /// ignored.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        emotions: &EmotionVector,
        params: &RenderParameters,
        rng: &mut R,
    ) -> Result<Artwork> {
        params.validate()?;
        Ok(self.run(emotions, params, rng))
    }

    fn run<R: Rng + ?Sized>(
        &self,
        emotions: &EmotionVector,
        params: &RenderParameters,
        rng: &mut R,
    ) -> Artwork {
        let mut log = StageLog::new();
        log.enter(GenerationStage::Seeding);

        let palette = self.palettes.select(emotions);
        let dominant = emotions.dominant().to_string();

        let canvas = if params.style.is_watercolor() {
            log.enter(GenerationStage::Rendering);
            render_watercolor_with_palette(
                &palette,
                params.complexity,
                params.color_intensity,
                params.width,
                params.height,
                rng,
            )
        } else {
            log.enter(GenerationStage::PaletteResolved);
            let mut canvas = Canvas::new(params.width, params.height, palette.background());
            let intensity = emotions.dominant_intensity();

            log.enter(GenerationStage::Rendering);
            if params.style.draws_mandala() {
                render_mandala(&mut canvas, &palette, params.complexity, intensity);
            }
            if params.style.draws_abstract() {
                render_abstract(&mut canvas, &palette, params.complexity, intensity, rng);
            }

            log.enter(GenerationStage::PostProcessing);
            gaussian_blur(&mut canvas, FINAL_SOFTEN_SIGMA);
            canvas
        };
        log.enter(GenerationStage::Done);

        info!(
            style = %params.style,
            dominant = %dominant,
            palette = palette.name(),
            width = params.width,
            height = params.height,
            complexity = params.complexity,
            "generated artwork"
        );

        Artwork {
            canvas,
            palette,
            dominant,
            style: params.style,
            seed: None,
            stages: log.stages,
        }
    }
}

/// Generate an image with DefaultPalettes.
pub fn generate_art(emotions: &EmotionVector, params: &RenderParameters) -> Result<Canvas> {
    ArtGenerator::new()
        .generate(emotions, params)
        .map(Artwork::into_canvas)
}

/// Generate an image with DefaultPalettes and a caller-supplied generator.
pub fn generate_art_with_rng<R: Rng + ?Sized>(
    emotions: &EmotionVector,
    params: &RenderParameters,
    rng: &mut R,
) -> Result<Canvas> {
    ArtGenerator::new()
        .generate_with_rng(emotions, params, rng)
        .map(Artwork::into_canvas)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use GenerationStage::*;

    fn joy() -> EmotionVector {
        EmotionVector::new([("joy", 0.7), ("neutral", 0.3)]).unwrap()
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Mandala".parse::<Style>().unwrap(), Style::Mandala);
        assert_eq!(" abstract ".parse::<Style>().unwrap(), Style::Abstract);
        assert_eq!("WATERCOLOR".parse::<Style>().unwrap(), Style::Watercolor);
        assert_eq!("Hybrid (Mandala+Abstract)".parse::<Style>().unwrap(), Style::Hybrid);
        assert_eq!("hybrid".parse::<Style>().unwrap(), Style::Hybrid);
        assert!(matches!("Cubist".parse::<Style>(), Err(ArtError::UnknownStyle(s)) if s == "Cubist"));
        assert!("".parse::<Style>().is_err());
    }

    #[test]
    fn test_style_layers() {
        assert!(Style::Hybrid.draws_mandala() && Style::Hybrid.draws_abstract());
        assert!(Style::Mandala.draws_mandala() && !Style::Mandala.draws_abstract());
        assert!(!Style::Abstract.draws_mandala() && Style::Abstract.draws_abstract());
        assert!(!Style::Watercolor.draws_mandala() && !Style::Watercolor.draws_abstract());
        for s in Style::ALL {
            assert_eq!(s.to_string().parse::<Style>().unwrap(), s);
        }
    }

    #[test]
    fn test_default_parameters() {
        let p = RenderParameters::default();
        assert_eq!(p.style, Style::Hybrid);
        assert_eq!((p.complexity, p.color_intensity), (5, 6));
        assert_eq!((p.width, p.height), (1024, 1024));
        assert_eq!(p.seed, None);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_sizes() {
        for (w, h) in [(0, 10), (10, 0), (MAX_DIMENSION + 1, 10)] {
            let p = RenderParameters::default().with_size(w, h);
            assert!(matches!(p.validate(), Err(ArtError::InvalidSize { .. })));
            assert!(generate_art(&joy(), &p).is_err());
        }
    }

    #[test]
    fn test_invalid_complexity() {
        let p = RenderParameters::new(Style::Watercolor)
            .with_complexity(200_000_000)
            .with_size(4, 4)
            .with_seed(1);
        assert!(matches!(p.validate(), Err(ArtError::InvalidComplexity(200_000_000))));
        assert!(matches!(generate_art(&joy(), &p), Err(ArtError::InvalidComplexity(_))));

        let p = RenderParameters::new(Style::Hybrid).with_complexity(MAX_COMPLEXITY + 1);
        assert!(matches!(p.validate(), Err(ArtError::InvalidComplexity(101))));

        for c in [0, MAX_COMPLEXITY] {
            assert!(RenderParameters::default().with_complexity(c).validate().is_ok());
        }
    }

    #[test]
    fn test_layer_stages() {
        let p = RenderParameters::new(Style::Mandala).with_size(64, 64).with_seed(1);
        let art = ArtGenerator::new().generate(&joy(), &p).unwrap();
        assert_eq!(
            art.stages,
            [Idle, Seeding, PaletteResolved, Rendering, PostProcessing, Done]
        );
        assert_eq!(art.seed, Some(1));
        assert_eq!(art.dominant, "joy");
        assert_eq!(art.style, Style::Mandala);
    }

    #[test]
    fn test_watercolor_short_circuits() {
        let p = RenderParameters::new(Style::Watercolor)
            .with_size(64, 64)
            .with_complexity(1)
            .with_seed(1);
        let art = ArtGenerator::new().generate(&joy(), &p).unwrap();
        assert_eq!(art.stages, [Idle, Seeding, Rendering, Done]);
        assert_eq!(art.canvas.dimensions(), (64, 64));
    }

    #[test]
    fn test_unseeded_run_reports_its_seed() {
        let p = RenderParameters::new(Style::Abstract).with_size(48, 48);
        let art = ArtGenerator::new().generate(&joy(), &p).unwrap();
        let seed = art.seed.unwrap();
        let again = generate_art(&joy(), &p.clone().with_seed(seed)).unwrap();
        assert_eq!(art.canvas, again);
    }

    #[test]
    fn test_generate_with_rng_has_no_seed() {
        let p = RenderParameters::new(Style::Abstract).with_size(48, 48);
        let mut rng = StdRng::seed_from_u64(9);
        let art = ArtGenerator::new().generate_with_rng(&joy(), &p, &mut rng).unwrap();
        assert_eq!(art.seed, None);
    }

    #[test]
    fn test_custom_palette_table() {
        let mut table = PaletteTable::defaults();
        table.insert_hex("joy", &["#101010", "#202020", "#303030"]).unwrap();
        let p = RenderParameters::new(Style::Mandala).with_size(32, 32);
        let art = ArtGenerator::with_palettes(table).generate(&joy(), &p).unwrap();
        assert_eq!(art.palette.hex_colors(), ["#101010", "#202020", "#303030"]);
    }

    #[test]
    fn test_parameters_from_toml() {
        let p: RenderParameters = toml::from_str(
            r#"
            style = "Watercolor"
            complexity = 3
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(p.style, Style::Watercolor);
        assert_eq!(p.complexity, 3);
        assert_eq!(p.seed, Some(42));
        assert_eq!(p.width, 1024);

        assert!(toml::from_str::<RenderParameters>(r#"style = "Pointillism""#).is_err());
        assert!(toml::from_str::<RenderParameters>("colour = 3").is_err());
    }
}
