//! Pattern-rule sprite selection for kazhard tactical maps
//!
//! This crate maps a tile's 8-direction neighbor pattern to a sprite variant
//! (autotiling), the way the map viewer picks cliff pieces.
//!
//! # Features
//! - 3x3 diagram strings for authoring patterns
//! - Ordered (first match wins) pattern rules with required/forbidden masks
//! - Two-branch selectors switched by a tile predicate
//! - Sprite catalogs bound from TOML sheet configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use kazhard_autotile::{cliff, SheetConfig};
//! use kazhard_core::{build, TerrainGrid};
//!
//! let catalog = SheetConfig::cliff_set_dark().catalog()?;
//! let selector = cliff::is_raised_switch(catalog)?;
//!
//! let grid = build(&TerrainGrid::sample())?;
//! for tile in grid.tiles() {
//!     let cell = selector.resolve(tile);
//!     // hand `cell` to the renderer
//! }
//! ```

pub mod cliff;
pub mod config;
pub mod diagram;
pub mod rule;
pub mod selector;

// Re-export main types at crate root
pub use config::{ConfigError, SheetCell, SheetConfig, SheetInfo};
pub use diagram::{format_diagram, parse_diagram, DIAGRAM_LEN};
pub use rule::{PatternRule, VariantTag, MAX_VARIANTS};
pub use selector::{SpriteCatalog, SwitchKind, VariantSelector, VariantSelectorBuilder};

// Re-export kazhard_core
pub use kazhard_core;

use thiserror::Error;

/// Errors raised while declaring rules or binding sprites
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Invalid diagram string: {0:?}")]
    InvalidDiagram(String),
    #[error("Variant tag out of range: {0}")]
    InvalidVariantTag(usize),
    #[error("Too many variants for one catalog: {0} (at most {max})", max = crate::rule::MAX_VARIANTS)]
    TooManyVariants(usize),
}
