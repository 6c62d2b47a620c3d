//! Sprite sheet configuration
//!
//! Binds variant names to cells of a sprite sheet, deserialized from TOML:
//!
//! ```toml
//! [sheet]
//! name = "CliffSetDark"
//! cell_width = 32
//! cell_height = 32
//! default = 1
//!
//! [sprites]
//! pillar = 0
//! north = 2
//! ```

use crate::cliff::{self, CLIFF_VARIANT_COUNT};
use crate::selector::SpriteCatalog;
use crate::SelectorError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a sheet configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read sheet config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse sheet config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown sprite variant: {0}")]
    UnknownVariant(String),
    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Top-level sheet configuration, deserialized from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub sheet: SheetInfo,
    /// Variant name -> cell index
    #[serde(default)]
    pub sprites: BTreeMap<String, u32>,
}

/// The sprite sheet image and how it is cut into cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub name: String,
    #[serde(default = "default_cell_size")]
    pub cell_width: u32,
    #[serde(default = "default_cell_size")]
    pub cell_height: u32,
    /// Cell used for anything without a binding of its own
    pub default: u32,
}

fn default_cell_size() -> u32 {
    32
}

/// A cell of the configured sheet; the opaque handle the renderer receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetCell {
    pub index: u32,
}

impl SheetConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SheetConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(
            "Loaded sheet config '{}' from {}: {} sprite bindings",
            config.sheet.name,
            path.display(),
            config.sprites.len()
        );
        Ok(config)
    }

    /// Bindings for the dark cliff sheet
    pub fn cliff_set_dark() -> Self {
        let bindings = [
            ("pillar", 0),
            ("blank", 1),
            ("north", 2),
            ("north_south", 4),
            ("side_pillar", 5),
            ("northwest", 6),
            ("south_edge", 7),
            ("northeast", 8),
            ("west", 10),
            ("east_edge", 11),
            ("side_flat", 12),
            ("west_edge", 13),
            ("east", 14),
            ("side_west", 15),
            ("southwest", 16),
            ("north_edge", 17),
            ("southeast", 18),
            ("side_east", 19),
            ("east_west", 20),
            ("south", 22),
        ];
        Self {
            sheet: SheetInfo {
                name: "CliffSetDark".to_string(),
                cell_width: 32,
                cell_height: 32,
                default: 1,
            },
            sprites: bindings
                .iter()
                .map(|(name, index)| (name.to_string(), *index))
                .collect(),
        }
    }

    /// Build a catalog over the cliff variants
    pub fn catalog(&self) -> Result<SpriteCatalog<SheetCell>, ConfigError> {
        if self.sheet.cell_width == 0 || self.sheet.cell_height == 0 {
            return Err(ConfigError::InvalidSheet(format!(
                "'{}' has a zero cell size ({}x{})",
                self.sheet.name, self.sheet.cell_width, self.sheet.cell_height
            )));
        }

        let mut catalog = SpriteCatalog::new(
            CLIFF_VARIANT_COUNT,
            SheetCell {
                index: self.sheet.default,
            },
        )?;
        for (name, &index) in &self.sprites {
            let tag = cliff::variant_by_name(name)
                .ok_or_else(|| ConfigError::UnknownVariant(name.clone()))?;
            catalog.set_sprite(tag, SheetCell { index })?;
        }

        for tag in catalog.unbound() {
            warn!(
                "Sheet '{}' leaves variant '{}' unbound; it will use the default cell",
                self.sheet.name,
                cliff::variant_name(tag).unwrap_or("?")
            );
        }
        Ok(catalog)
    }
}
