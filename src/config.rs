//! TOML configuration.
//!
//! ```toml
//! [render]
//! style = "Hybrid"
//! complexity = 7
//! seed = 42
//!
//! [palettes]
//! fear = ["#2B2D42", "#8D99AE", "#EDF2F4"]
//! ```
//!
//! `[render]` supplies defaults for any [`RenderParameters`] field; the
//! command line overrides them. `[palettes]` adds entries to DefaultPalettes
//! or replaces existing ones.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ArtError, Result};
use crate::generator::RenderParameters;
use crate::palette::PaletteTable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtConfig {
    pub render: RenderParameters,
    pub palettes: BTreeMap<String, Vec<String>>,
}

impl ArtConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ArtError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), palettes = config.palettes.len(), "loaded config");
        Ok(config)
    }

    /// DefaultPalettes with this config's entries applied.
    pub fn palette_table(&self) -> Result<PaletteTable> {
        let mut table = PaletteTable::defaults();
        for (name, colors) in &self.palettes {
            table.insert_hex(name, colors)?;
        }
        Ok(table)
    }
}

// ============================================================================
// Tests
// ============================================================================
