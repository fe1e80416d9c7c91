//! Palette selection — maps an emotion vector to colors and a background.
//!
//! The palette is a pure function of the dominant emotion: look it up in a
//! [`PaletteTable`], fall back to `neutral` when it has no entry, and pick a
//! dark background for the heavy emotions (sadness, fear, anger) and a light
//! one for everything else.

use tracing::debug;

use crate::color::Rgb8;
use crate::emotion::EmotionVector;
use crate::error::{ArtError, Result};

/// Background used when the dominant emotion is in [`DARK_EMOTIONS`].
pub const DARK_BACKGROUND: Rgb8 = Rgb8::new(0x0F, 0x17, 0x2A);

/// Background for every other dominant emotion.
pub const LIGHT_BACKGROUND: Rgb8 = Rgb8::WHITE;

pub const DARK_EMOTIONS: [&str; 3] = ["sadness", "fear", "anger"];

/// Palette used when the dominant emotion has no entry of its own.
pub const FALLBACK_PALETTE: &str = "neutral";

const NEUTRAL_COLORS: [Rgb8; 3] = [
    Rgb8::new(0xE2, 0xE8, 0xF0),
    Rgb8::new(0xCB, 0xD5, 0xE1),
    Rgb8::new(0xF8, 0xFA, 0xFC),
];

/// DefaultPalettes, in listing order.
#[rustfmt::skip]
const DEFAULT_PALETTES: [(&str, [Rgb8; 3]); 6] = [
    ("joy",     [Rgb8::new(0xFF, 0xD1, 0x66), Rgb8::new(0xFF, 0x7B, 0x7B), Rgb8::new(0xC4, 0xFC, 0xEF)]),
    ("sadness", [Rgb8::new(0x02, 0x3E, 0x8A), Rgb8::new(0x00, 0x77, 0xB6), Rgb8::new(0x90, 0xE0, 0xEF)]),
    ("calm",    [Rgb8::new(0xBD, 0xE0, 0xFE), Rgb8::new(0xCA, 0xE9, 0xFF), Rgb8::new(0xE8, 0xF8, 0xFF)]),
    ("anger",   [Rgb8::new(0xEF, 0x47, 0x6F), Rgb8::new(0xFF, 0x7B, 0x2D), Rgb8::new(0xF9, 0xC7, 0x4F)]),
    ("hope",    [Rgb8::new(0xFF, 0xB7, 0x03), Rgb8::new(0x8E, 0xC5, 0xFF), Rgb8::new(0xFD, 0xE6, 0x8A)]),
    (FALLBACK_PALETTE, NEUTRAL_COLORS),
];

// ============================================================================
// Palette
// ============================================================================

/// Ordered palette colors plus a background, resolved for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: Vec<Rgb8>,
    background: Rgb8,
}

impl Palette {
    /// Table entry the colors came from (`neutral` after a fallback).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// First color; the watercolor wash is painted in it.
    pub fn primary(&self) -> Rgb8 {
        self.colors[0]
    }

    /// Color at position `t` in `[0, 1]` along the palette.
    ///
    /// Nearest-index selection, never blended: index `floor(t * (len - 1))`,
    /// clamped to the palette. With three colors, `t < 0.5` picks the first
    /// color and `t` in `[0.5, 1)` the second; only `t = 1` reaches the last.
    pub fn color_at(&self, t: f64) -> Rgb8 {
        let last = self.colors.len() - 1;
        let idx = (t * last as f64) as usize;
        self.colors[idx.min(last)]
    }

    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(Rgb8::to_hex).collect()
    }
}

/// Background policy for a dominant emotion.
pub fn background_for(dominant: &str) -> Rgb8 {
    if DARK_EMOTIONS.contains(&dominant) {
        DARK_BACKGROUND
    } else {
        LIGHT_BACKGROUND
    }
}

// ============================================================================
// PaletteTable
// ============================================================================

/// Emotion name → ordered colors.
///
/// Starts from DefaultPalettes; entries can be replaced or added (from a
/// config file) but never removed, so the `neutral` fallback always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    entries: Vec<(String, Vec<Rgb8>)>,
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PaletteTable {
    pub fn defaults() -> Self {
        Self {
            entries: DEFAULT_PALETTES
                .iter()
                .map(|(name, colors)| (name.to_string(), colors.to_vec()))
                .collect(),
        }
    }

    /// Add an entry or replace an existing one. An entry needs at least one
    /// color.
    pub fn insert(&mut self, name: &str, colors: Vec<Rgb8>) -> Result<()> {
        let name = name.trim().to_lowercase();
        if colors.is_empty() {
            return Err(ArtError::Config(format!("palette '{name}' has no colors")));
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = colors,
            None => self.entries.push((name, colors)),
        }
        Ok(())
    }

    /// Parse hex colors and insert them under `name`.
    pub fn insert_hex<S: AsRef<str>>(&mut self, name: &str, colors: &[S]) -> Result<()> {
        let colors = colors
            .iter()
            .map(|c| Rgb8::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.insert(name, colors)
    }

    pub fn get(&self, name: &str) -> Option<&[Rgb8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rgb8])> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the palette for `emotions`. Never fails.
    pub fn select(&self, emotions: &EmotionVector) -> Palette {
        let dominant = emotions.dominant();
        let (name, colors) = match self.get(dominant) {
            Some(colors) => (dominant, colors),
            None => {
                debug!(dominant, "no palette for dominant emotion, using neutral");
                (
                    FALLBACK_PALETTE,
                    self.get(FALLBACK_PALETTE).unwrap_or(&NEUTRAL_COLORS),
                )
            }
        };
        Palette {
            name: name.to_string(),
            colors: colors.to_vec(),
            background: background_for(dominant),
        }
    }
}

/// Resolve a palette from DefaultPalettes.
pub fn select_palette(emotions: &EmotionVector) -> Palette {
    PaletteTable::defaults().select(emotions)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn emotions(pairs: &[(&str, f64)]) -> EmotionVector {
        EmotionVector::new(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_joy_palette() {
        let p = select_palette(&emotions(&[("joy", 0.7), ("neutral", 0.3)]));
        assert_eq!(p.name(), "joy");
        assert_eq!(p.hex_colors(), ["#FFD166", "#FF7B7B", "#C4FCEF"]);
        assert_eq!(p.background().to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_unknown_emotion_falls_back_to_neutral() {
        let p = select_palette(&emotions(&[("zzz_unknown_emotion", 1.0)]));
        assert_eq!(p.name(), "neutral");
        assert_eq!(p.colors(), &NEUTRAL_COLORS);
        assert_eq!(p.background(), LIGHT_BACKGROUND);
    }

    #[test]
    fn test_background_policy() {
        let anger = select_palette(&emotions(&[("anger", 0.9), ("joy", 0.1)]));
        assert_eq!(anger.background(), DARK_BACKGROUND);
        assert_eq!(anger.background().to_hex(), "#0F172A");

        let joy = select_palette(&emotions(&[("joy", 0.9), ("anger", 0.1)]));
        assert_eq!(joy.background(), LIGHT_BACKGROUND);
    }

    #[test]
    fn test_fear_has_dark_background_and_neutral_colors() {
        let p = select_palette(&emotions(&[("fear", 0.8)]));
        assert_eq!(p.name(), "neutral");
        assert_eq!(p.background(), DARK_BACKGROUND);
    }

    #[test]
    fn test_color_at_nearest_index() {
        let p = select_palette(&emotions(&[("joy", 1.0)]));
        let c = p.colors().to_vec();
        assert_eq!(p.color_at(0.0), c[0]);
        assert_eq!(p.color_at(0.25), c[0]);
        assert_eq!(p.color_at(0.5), c[1]);
        assert_eq!(p.color_at(0.9), c[1]);
        assert_eq!(p.color_at(1.0), c[2]);
        assert_eq!(p.color_at(5.0), c[2]);
        assert_eq!(p.color_at(-1.0), c[0]);
    }

    #[test]
    fn test_custom_entry_overrides_default() {
        let mut table = PaletteTable::defaults();
        table.insert_hex("Joy", &["#000000", "#111111"]).unwrap();
        let p = table.select(&emotions(&[("joy", 1.0)]));
        assert_eq!(p.hex_colors(), ["#000000", "#111111"]);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_custom_entry_is_added() {
        let mut table = PaletteTable::defaults();
        table.insert_hex("fear", &["#2B2D42"]).unwrap();
        let p = table.select(&emotions(&[("fear", 1.0)]));
        assert_eq!(p.name(), "fear");
        assert_eq!(p.primary().to_hex(), "#2B2D42");
        assert_eq!(p.color_at(0.7), p.primary());
        assert_eq!(p.background(), DARK_BACKGROUND);
    }

    #[test]
    fn test_insert_rejects_bad_entries() {
        let mut table = PaletteTable::defaults();
        assert!(matches!(table.insert("joy", Vec::new()), Err(ArtError::Config(_))));
        assert!(matches!(
            table.insert_hex("joy", &["#12345"]),
            Err(ArtError::InvalidColor(_))
        ));
        assert_eq!(table.get("joy").map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_listing_order() {
        let table = PaletteTable::defaults();
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["joy", "sadness", "calm", "anger", "hope", "neutral"]);
    }
}
