//! Core data structures for kazhard tactical maps
//!
//! This crate provides the tile-level model of a tactical map:
//! - `TerrainGrid` - Raw terrain input, border ring included
//! - `TileRecord` - A single tile's packed flags, coordinates and neighbor pattern
//! - `TacticalGrid` - The built, read-only arena of tile records
//! - `GridBuilder` - Instantiates, links and derives patterns for a grid
//! - `Direction` / `Pattern8` - The 8-direction compass and its bitset
//!
//! # Example
//!
//! ```rust,ignore
//! use kazhard_core::{build, Direction, TerrainGrid};
//!
//! let grid = build(&TerrainGrid::sample())?;
//! let tile = grid.tile(10, 6)?;
//! assert!(tile.is_raised());
//! let north = grid.neighbor(tile, Direction::North);
//! ```

mod direction;
mod grid;
mod terrain;
mod tile;

pub use direction::{offset_from_index, Direction, Pattern8};
pub use grid::{build, GridBuilder, TacticalGrid};
pub use terrain::{TerrainGrid, TerrainKind};
pub use tile::{primary_pattern, TileCoord, TileFlags, TileRecord, TileSlot};

use thiserror::Error;

/// Side length of the logical map, in tiles
pub const MAX_DIM: usize = 16;
/// Side length of the map including its one-tile border ring
pub const BORDERED_DIM: usize = MAX_DIM + 2;
/// Number of logical (interior) tiles
pub const TILE_COUNT: usize = MAX_DIM * MAX_DIM;
/// Number of tiles including the border ring
pub const RAW_TILE_COUNT: usize = BORDERED_DIM * BORDERED_DIM;

/// Errors raised while assembling terrain or building a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("{axis} coordinate out of range: {value}")]
    OutOfRange { axis: char, value: i64 },
    #[error("Direction index out of range: {0}")]
    InvalidDirection(usize),
    #[error("Terrain grid must have {expected} cells, got {actual}")]
    TerrainSize { expected: usize, actual: usize },
    #[error("Unknown terrain code: {0}")]
    UnknownTerrainCode(u8),
    #[error("Unknown terrain glyph: {0:?}")]
    UnknownTerrainGlyph(char),
    #[error("Malformed terrain text: {0}")]
    MalformedAscii(String),
}
