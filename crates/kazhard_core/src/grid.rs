//! Grid construction and the built, read-only tactical grid
//!
//! Construction runs four strictly sequential stages over the whole grid:
//! 1. instantiate one record per raw cell (border ring included)
//! 2. link every record to its 8 neighbors
//! 3. primary pattern pass over interior tiles
//! 4. secondary pass fixing up ramp bases and marking the ramps they climb
//!
//! Stage 4 writes to neighboring tiles, so it only starts once stage 3 has
//! covered the entire grid.

use crate::direction::{Direction, Pattern8};
use crate::terrain::{is_ring_position, TerrainGrid, TerrainKind};
use crate::tile::{TileFlags, TileRecord, TileSlot};
use crate::{GridError, BORDERED_DIM, MAX_DIM, RAW_TILE_COUNT, TILE_COUNT};
use log::debug;

/// Build a tactical grid from raw terrain
pub fn build(terrain: &TerrainGrid) -> Result<TacticalGrid, GridError> {
    GridBuilder::new(terrain).build()
}

/// Builds a [`TacticalGrid`] from a [`TerrainGrid`]
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a> {
    terrain: &'a TerrainGrid,
}

impl<'a> GridBuilder<'a> {
    pub fn new(terrain: &'a TerrainGrid) -> Self {
        Self { terrain }
    }

    pub fn build(&self) -> Result<TacticalGrid, GridError> {
        let mut tiles = self.instantiate()?;
        link_neighbors(&mut tiles);
        primary_pass(&mut tiles);
        secondary_pass(&mut tiles);

        let grid = TacticalGrid { tiles };
        debug!(
            "Built tactical grid: {} raised, {} ramp bases, {} ramps",
            grid.tiles().filter(|t| t.is_raised()).count(),
            grid.tiles().filter(|t| t.is_ramp_base()).count(),
            grid.ramp_count()
        );
        Ok(grid)
    }

    fn instantiate(&self) -> Result<Vec<TileRecord>, GridError> {
        let mut tiles = Vec::with_capacity(RAW_TILE_COUNT);
        for (index, kind) in self.terrain.cells().iter().enumerate() {
            let col = index % BORDERED_DIM;
            let row = index / BORDERED_DIM;

            let mut tile = TileRecord::new(TileSlot::new(index));
            tile.set_border(is_ring_position(col, row));
            match kind {
                TerrainKind::Wall => tile.set_raised(true),
                TerrainKind::RampBase => tile.set_ramp_base(true),
                TerrainKind::Floor => {}
            }
            // No-op for the ring
            tile.set_coordinates(col as i32 - 1, row as i32 - 1)?;
            tiles.push(tile);
        }
        Ok(tiles)
    }
}

/// Neighbor slots are clamped into the raw grid, so ring tiles point at
/// ring tiles wherever they would leave the map
fn link_neighbors(tiles: &mut [TileRecord]) {
    let last = BORDERED_DIM as i32 - 1;
    for (index, tile) in tiles.iter_mut().enumerate() {
        let col = (index % BORDERED_DIM) as i32;
        let row = (index / BORDERED_DIM) as i32;
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let ncol = (col + dx).clamp(0, last) as usize;
            let nrow = (row + dy).clamp(0, last) as usize;
            tile.link(direction, TileSlot::new(nrow * BORDERED_DIM + ncol));
        }
    }
}

fn primary_pass(tiles: &mut [TileRecord]) {
    for slot in interior_slots() {
        let tile = &tiles[slot];
        let mut neighbor_flags = [TileFlags::empty(); 8];
        for direction in Direction::ALL {
            neighbor_flags[direction.index()] = tiles[tile.neighbor_slot(direction).index()].flags();
        }
        tiles[slot].recompute_pattern(&neighbor_flags);
    }
}

/// Row-major. Only `RAMP` and ramp-base patterns are written here while only
/// `RAISED` and `RAMP_BASE` are read, so visiting order cannot change the result.
fn secondary_pass(tiles: &mut [TileRecord]) {
    for slot in interior_slots() {
        if !tiles[slot].is_ramp_base() {
            continue;
        }
        tiles[slot].restrict_pattern(Pattern8::ORTHOGONAL);
        for direction in Direction::ORTHOGONAL {
            let neighbor = tiles[slot].neighbor_slot(direction).index();
            if tiles[neighbor].is_raised() {
                tiles[neighbor].set_ramp(true);
            }
        }
    }
}

/// Raw slot of interior tile `y * MAX_DIM + x`
fn interior_slot(index: usize) -> usize {
    let x = index % MAX_DIM;
    let y = index / MAX_DIM;
    (y + 1) * BORDERED_DIM + (x + 1)
}

fn interior_slots() -> impl Iterator<Item = usize> {
    (0..TILE_COUNT).map(interior_slot)
}

/// A fully built tactical map.
///
/// Read-only once built; share it freely between readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacticalGrid {
    tiles: Vec<TileRecord>,
}

impl TacticalGrid {
    /// The interior tiles, ordered by `y * MAX_DIM + x`
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = &TileRecord> + '_ {
        (0..TILE_COUNT).map(move |i| &self.tiles[interior_slot(i)])
    }

    /// Every record in raw row-major order, border ring included
    pub fn raw_tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    /// Interior tile at logical coordinates
    pub fn tile(&self, x: usize, y: usize) -> Result<&TileRecord, GridError> {
        if x >= MAX_DIM {
            return Err(GridError::OutOfRange {
                axis: 'x',
                value: x as i64,
            });
        }
        if y >= MAX_DIM {
            return Err(GridError::OutOfRange {
                axis: 'y',
                value: y as i64,
            });
        }
        Ok(&self.tiles[interior_slot(y * MAX_DIM + x)])
    }

    /// Interior tile by row-major index
    pub fn tile_at(&self, index: usize) -> Option<&TileRecord> {
        (index < TILE_COUNT).then(|| &self.tiles[interior_slot(index)])
    }

    /// Record at raw position (border ring included)
    pub fn raw_tile(&self, col: usize, row: usize) -> Result<&TileRecord, GridError> {
        if col >= BORDERED_DIM {
            return Err(GridError::OutOfRange {
                axis: 'x',
                value: col as i64,
            });
        }
        if row >= BORDERED_DIM {
            return Err(GridError::OutOfRange {
                axis: 'y',
                value: row as i64,
            });
        }
        Ok(&self.tiles[row * BORDERED_DIM + col])
    }

    pub fn get(&self, slot: TileSlot) -> Option<&TileRecord> {
        self.tiles.get(slot.index())
    }

    pub fn neighbor(&self, tile: &TileRecord, direction: Direction) -> &TileRecord {
        &self.tiles[tile.neighbor_slot(direction).index()]
    }

    /// Neighbor by raw direction index
    pub fn neighbor_at(&self, tile: &TileRecord, direction: usize) -> Result<&TileRecord, GridError> {
        Ok(self.neighbor(tile, Direction::from_index(direction)?))
    }

    /// Number of records flagged as ramps, ring included
    pub fn ramp_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_ramp()).count()
    }
}
