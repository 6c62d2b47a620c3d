//! Packed per-tile state
//!
//! Tiles are kept small since a map session can hold a lot of them: flags,
//! coordinates and the derived neighbor pattern are one byte each, and
//! neighbors are arena slots rather than references.

use crate::direction::{Direction, Pattern8};
use crate::{GridError, MAX_DIM};
use bitflags::bitflags;

bitflags! {
    /// Independent terrain-shape attributes of a tile
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileFlags: u8 {
        /// Part of the synthetic ring around the logical map
        const BORDER    = 0b0000_0001;
        /// Elevated terrain (wall / cliff)
        const RAISED    = 0b0000_0010;
        /// Floor that connects to raised terrain through a ramp
        const RAMP_BASE = 0b0000_0100;
        /// Raised tile that a ramp base climbs onto
        const RAMP      = 0b0000_1000;
    }
}

impl Default for TileFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Logical tile coordinates packed as `(y << 4) | x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileCoord(u8);

impl TileCoord {
    const X_MASK: u8 = 0x0F;

    pub fn new(x: i32, y: i32) -> Result<Self, GridError> {
        if x < 0 || x as usize >= MAX_DIM {
            return Err(GridError::OutOfRange {
                axis: 'x',
                value: x.into(),
            });
        }
        if y < 0 || y as usize >= MAX_DIM {
            return Err(GridError::OutOfRange {
                axis: 'y',
                value: y.into(),
            });
        }
        Ok(Self(((y as u8) << 4) | x as u8))
    }

    pub fn x(self) -> usize {
        (self.0 & Self::X_MASK) as usize
    }

    pub fn y(self) -> usize {
        (self.0 >> 4) as usize
    }

    /// The packed byte, which doubles as the row-major interior index
    pub fn packed(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a tile inside the bordered grid arena (raw row-major order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileSlot(u16);

impl TileSlot {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u16)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The data side of a map tile, not concerned with rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    flags: TileFlags,
    coordinates: TileCoord,
    pattern: Pattern8,
    slot: TileSlot,
    neighbors: [TileSlot; 8],
}

impl TileRecord {
    /// Create an unlinked tile for the given arena slot
    pub fn new(slot: TileSlot) -> Self {
        Self {
            flags: TileFlags::empty(),
            coordinates: TileCoord::default(),
            pattern: Pattern8::empty(),
            slot,
            neighbors: [slot; 8],
        }
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn is_border(&self) -> bool {
        self.flags.contains(TileFlags::BORDER)
    }

    pub fn set_border(&mut self, state: bool) {
        self.flags.set(TileFlags::BORDER, state);
    }

    pub fn is_raised(&self) -> bool {
        self.flags.contains(TileFlags::RAISED)
    }

    pub fn set_raised(&mut self, state: bool) {
        self.flags.set(TileFlags::RAISED, state);
    }

    pub fn is_ramp_base(&self) -> bool {
        self.flags.contains(TileFlags::RAMP_BASE)
    }

    pub fn set_ramp_base(&mut self, state: bool) {
        self.flags.set(TileFlags::RAMP_BASE, state);
    }

    pub fn is_ramp(&self) -> bool {
        self.flags.contains(TileFlags::RAMP)
    }

    pub fn set_ramp(&mut self, state: bool) {
        self.flags.set(TileFlags::RAMP, state);
    }

    /// Logical coordinates; border tiles have none
    pub fn coordinates(&self) -> Option<TileCoord> {
        (!self.is_border()).then_some(self.coordinates)
    }

    /// Assign logical coordinates.
    ///
    /// Border tiles ignore this and keep their state untouched.
    pub fn set_coordinates(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        if self.is_border() {
            return Ok(());
        }
        self.coordinates = TileCoord::new(x, y)?;
        Ok(())
    }

    pub fn adjacency_pattern(&self) -> Pattern8 {
        self.pattern
    }

    /// This tile's own slot in the grid arena
    pub fn slot(&self) -> TileSlot {
        self.slot
    }

    pub fn neighbor_slot(&self, direction: Direction) -> TileSlot {
        self.neighbors[direction.index()]
    }

    pub(crate) fn link(&mut self, direction: Direction, neighbor: TileSlot) {
        self.neighbors[direction.index()] = neighbor;
    }

    /// Recompute the adjacency pattern from the current neighbor flags,
    /// given in direction index order. Border tiles are left alone.
    pub fn recompute_pattern(&mut self, neighbor_flags: &[TileFlags; 8]) {
        if self.is_border() {
            return;
        }
        self.pattern = primary_pattern(self.flags, neighbor_flags);
    }

    pub(crate) fn restrict_pattern(&mut self, keep: Pattern8) {
        self.pattern &= keep;
    }
}

/// A direction's bit is set iff that neighbor is raised, or this tile is
/// raised and the neighbor is a ramp base
pub fn primary_pattern(own: TileFlags, neighbor_flags: &[TileFlags; 8]) -> Pattern8 {
    let own_raised = own.contains(TileFlags::RAISED);
    Direction::ALL
        .into_iter()
        .fold(Pattern8::empty(), |pattern, direction| {
            let neighbor = neighbor_flags[direction.index()];
            let raised = neighbor.contains(TileFlags::RAISED)
                || (own_raised && neighbor.contains(TileFlags::RAMP_BASE));
            pattern.with(direction, raised)
        })
}
