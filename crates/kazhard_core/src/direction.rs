//! Compass directions and the 8-direction neighbor bitset

use crate::GridError;
use bitflags::bitflags;

/// One of the 8 compass directions, in the fixed index order used by
/// neighbor slots and pattern bits (counter-clockwise from east)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    North = 2,
    NorthWest = 3,
    West = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

impl Direction {
    /// Number of directions
    pub const COUNT: usize = 8;

    /// All directions in index order
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// The four orthogonal directions (even indices)
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Look up a direction by index
    pub fn from_index(index: usize) -> Result<Self, GridError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GridError::InvalidDirection(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid offset `(dx, dy)` with y growing southwards
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Check if this is a corner direction (odd indices)
    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    /// The direction pointing back at us from the neighbor
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % Self::COUNT]
    }

    /// The pattern bit for this direction
    pub fn bit(self) -> Pattern8 {
        Pattern8::from_bits_retain(1 << self.index())
    }
}

/// Offset lookup by raw direction index
pub fn offset_from_index(index: usize) -> Result<(i32, i32), GridError> {
    Direction::from_index(index).map(Direction::offset)
}

bitflags! {
    /// One bit per direction; bit `i` belongs to the direction with index `i`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Pattern8: u8 {
        const EAST       = 0b0000_0001;
        const NORTH_EAST = 0b0000_0010;
        const NORTH      = 0b0000_0100;
        const NORTH_WEST = 0b0000_1000;
        const WEST       = 0b0001_0000;
        const SOUTH_WEST = 0b0010_0000;
        const SOUTH      = 0b0100_0000;
        const SOUTH_EAST = 0b1000_0000;

        const ORTHOGONAL = Self::EAST.bits() | Self::NORTH.bits() | Self::WEST.bits() | Self::SOUTH.bits();
        const DIAGONAL = Self::NORTH_EAST.bits() | Self::NORTH_WEST.bits() | Self::SOUTH_WEST.bits() | Self::SOUTH_EAST.bits();
    }
}

impl Default for Pattern8 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Pattern8 {
    /// Check a single direction's bit
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.bit())
    }

    /// Set or clear a single direction's bit
    pub fn with(mut self, direction: Direction, state: bool) -> Self {
        self.set(direction.bit(), state);
        self
    }

    /// Rule predicate: every `required` bit is on and no `forbidden` bit is on
    pub fn matches_masks(self, required: Pattern8, forbidden: Pattern8) -> bool {
        self.contains(required) && !self.intersects(forbidden)
    }

    /// Directions whose bit is set, in index order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets_match_table() {
        let expected = [
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        for (i, offset) in expected.iter().enumerate() {
            assert_eq!(offset_from_index(i).unwrap(), *offset);
        }
    }

    #[test]
    fn test_invalid_direction_index() {
        assert_eq!(
            Direction::from_index(8),
            Err(GridError::InvalidDirection(8))
        );
        assert!(offset_from_index(usize::MAX).is_err());
    }

    #[test]
    fn test_opposite_and_diagonal() {
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
        assert!(Direction::NorthWest.is_diagonal());
        assert!(!Direction::South.is_diagonal());
        for d in Direction::ORTHOGONAL {
            assert!(Pattern8::ORTHOGONAL.has(d));
            assert!(!Pattern8::DIAGONAL.has(d));
        }
    }

    #[test]
    fn test_bits_follow_index() {
        for d in Direction::ALL {
            assert_eq!(d.bit().bits(), 1u8 << d.index());
        }
        assert_eq!(Direction::North.bit(), Pattern8::NORTH);
    }

    #[test]
    fn test_with_does_not_disturb_other_bits() {
        let p = Pattern8::NORTH | Pattern8::SOUTH;
        let p = p.with(Direction::East, true).with(Direction::North, false);
        assert_eq!(p, Pattern8::SOUTH | Pattern8::EAST);
        assert_eq!(
            p.directions().collect::<Vec<_>>(),
            vec![Direction::East, Direction::South]
        );
    }

    #[test]
    fn test_matches_masks() {
        let required = Pattern8::NORTH;
        let forbidden = Pattern8::NORTH_WEST | Pattern8::NORTH_EAST;

        assert!(Pattern8::NORTH.matches_masks(required, forbidden));
        assert!((Pattern8::NORTH | Pattern8::SOUTH).matches_masks(required, forbidden));
        assert!(!Pattern8::empty().matches_masks(required, forbidden));
        assert!(!(Pattern8::NORTH | Pattern8::NORTH_EAST).matches_masks(required, forbidden));
        // Empty masks match everything
        assert!(Pattern8::all().matches_masks(Pattern8::empty(), Pattern8::empty()));
    }
}
