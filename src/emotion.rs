//! Emotion vectors — named intensities describing a mood.
//!
//! An [`EmotionVector`] is the only input that drives visual decisions. It is
//! produced by an external collaborator (text or speech emotion detection) and
//! arrives here as a plain name → intensity mapping. Intensities are expected
//! in `[0, 1]` but are not required to sum to 1, and nothing re-normalizes
//! them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArtError, Result};

/// Conventional label set produced by the emotion detector.
pub const KNOWN_EMOTIONS: [&str; 8] = [
    "joy", "sadness", "anger", "fear", "surprise", "disgust", "neutral", "hope",
];

/// Non-empty mapping from emotion name to intensity.
///
/// Names are trimmed and lower-cased on construction. The dominant emotion is
/// resolved once here: the highest intensity wins, and exact ties go to the
/// lexicographically smallest name so the choice never depends on input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct EmotionVector {
    entries: BTreeMap<String, f64>,
    dominant: String,
    dominant_intensity: f64,
}

impl EmotionVector {
    /// Build a vector from `(name, intensity)` pairs.
    ///
    /// Fails with [`ArtError::EmptyEmotions`] when no pairs are given and with
    /// [`ArtError::InvalidIntensity`] for NaN, infinite or negative values.
    /// A repeated name keeps its last intensity.
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (name, value) in entries {
            let name = name.as_ref().trim().to_lowercase();
            if !value.is_finite() || value < 0.0 {
                return Err(ArtError::InvalidIntensity {
                    emotion: name,
                    value,
                });
            }
            if !KNOWN_EMOTIONS.contains(&name.as_str()) {
                debug!(emotion = %name, "emotion outside the detector's label set");
            }
            map.insert(name, value);
        }

        // BTreeMap iterates in ascending name order, so keeping the first
        // strict maximum implements the lexicographic tie-break.
        let mut dominant: Option<(&String, f64)> = None;
        for (name, &value) in &map {
            match dominant {
                Some((_, best)) if value <= best => {}
                _ => dominant = Some((name, value)),
            }
        }
        let (dominant, dominant_intensity) = match dominant {
            Some((name, value)) => (name.clone(), value),
            None => return Err(ArtError::EmptyEmotions),
        };

        Ok(Self {
            entries: map,
            dominant,
            dominant_intensity,
        })
    }

    /// Vector with a single emotion.
    pub fn single(name: &str, intensity: f64) -> Result<Self> {
        Self::new([(name, intensity)])
    }

    /// Name of the entry with maximum intensity.
    pub fn dominant(&self) -> &str {
        &self.dominant
    }

    /// Intensity of the dominant emotion.
    pub fn dominant_intensity(&self) -> f64 {
        self.dominant_intensity
    }

    pub fn intensity(&self, name: &str) -> Option<f64> {
        self.entries.get(&name.trim().to_lowercase()).copied()
    }

    /// Entries in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty vectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for EmotionVector {
    type Error = ArtError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        Self::new(map)
    }
}

impl From<EmotionVector> for BTreeMap<String, f64> {
    fn from(v: EmotionVector) -> Self {
        v.entries
    }
}

// ============================================================================
// Tests
// ============================================================================
