//! Headless board view for kazhard tactical maps
//!
//! Joins a built [`TacticalGrid`](kazhard_core::TacticalGrid) with a
//! [`VariantSelector`](kazhard_autotile::VariantSelector) into the per-cell
//! plan a renderer paints: a sprite for every interior tile and a ruler mark
//! for every cell of the border ring.
//!
//! # Example
//!
//! ```rust,ignore
//! use kazhard_autotile::SheetConfig;
//! use kazhard_core::TerrainGrid;
//! use kazhard_view::{BoardCell, MapSession};
//!
//! let mut session = MapSession::from_sheet(&SheetConfig::cliff_set_dark(), &TerrainGrid::walled())?;
//! session.load(&TerrainGrid::sample())?;
//!
//! for cell in session.layout().cells() {
//!     match cell {
//!         BoardCell::Ruler(mark) => { /* paint label / shading */ }
//!         BoardCell::Tile { x, y, sprite } => { /* blit sprite.index at (x, y) */ }
//!     }
//! }
//! ```

mod board;
mod session;

pub use board::{layout, BoardCell, BoardLayout, RulerMark};
pub use session::MapSession;

use kazhard_autotile::{ConfigError, SelectorError};
use kazhard_core::GridError;
use thiserror::Error;

/// Errors raised while building a view
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
