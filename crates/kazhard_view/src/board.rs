//! Board layout: what to paint in each raw cell

use kazhard_autotile::VariantSelector;
use kazhard_core::{Direction, GridError, TacticalGrid, BORDERED_DIM, MAX_DIM, RAW_TILE_COUNT};

/// Coordinate ruler drawn on the border ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulerMark {
    /// Edge of the board; corners use the diagonal
    pub side: Direction,
    pub shaded: bool,
    /// Column letter or row number, `None` on corners
    pub label: Option<String>,
}

/// One raw cell of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCell<H> {
    Ruler(RulerMark),
    Tile { x: usize, y: usize, sprite: H },
}

/// Render plan for a whole board, in raw row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout<H> {
    cells: Vec<BoardCell<H>>,
}

impl<H> BoardLayout<H> {
    pub fn cells(&self) -> &[BoardCell<H>] {
        &self.cells
    }

    /// Cell at raw position (border ring included)
    pub fn cell(&self, col: usize, row: usize) -> Result<&BoardCell<H>, GridError> {
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
        Ok(&self.cells[row * BORDERED_DIM + col])
    }

    /// Sprite of the interior tile at logical coordinates
    pub fn sprite(&self, x: usize, y: usize) -> Result<&H, GridError> {
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
        match &self.cells[(y + 1) * BORDERED_DIM + (x + 1)] {
            BoardCell::Tile { sprite, .. } => Ok(sprite),
            // `layout` only puts rulers on the ring and nothing else builds cells
            BoardCell::Ruler(_) => unreachable!("interior cell ({}, {}) holds a ruler", x, y),
        }
    }

    pub fn rulers(&self) -> impl Iterator<Item = &RulerMark> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            BoardCell::Ruler(mark) => Some(mark),
            BoardCell::Tile { .. } => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = &H> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            BoardCell::Tile { sprite, .. } => Some(sprite),
            BoardCell::Ruler(_) => None,
        })
    }
}

/// Resolve every interior tile and mark every ring cell
pub fn layout<H: Clone>(grid: &TacticalGrid, selector: &VariantSelector<H>) -> BoardLayout<H> {
    let mut cells = Vec::with_capacity(RAW_TILE_COUNT);
    for (index, tile) in grid.raw_tiles().iter().enumerate() {
        let cell = match tile.coordinates() {
            Some(coord) => BoardCell::Tile {
                x: coord.x(),
                y: coord.y(),
                sprite: selector.resolve(tile).clone(),
            },
            None => BoardCell::Ruler(ruler_mark(index % BORDERED_DIM, index / BORDERED_DIM)),
        };
        cells.push(cell);
    }
    BoardLayout { cells }
}

fn ruler_mark(col: usize, row: usize) -> RulerMark {
    let last = BORDERED_DIM - 1;
    let corner = |side| RulerMark {
        side,
        shaded: false,
        label: None,
    };

    match (col, row) {
        (0, 0) => corner(Direction::NorthWest),
        (c, 0) if c == last => corner(Direction::NorthEast),
        (0, r) if r == last => corner(Direction::SouthWest),
        (c, r) if c == last && r == last => corner(Direction::SouthEast),
        (c, 0) => RulerMark {
            side: Direction::North,
            shaded: c % 2 == 0,
            label: Some(column_letter(c - 1)),
        },
        (c, r) if r == last => RulerMark {
            side: Direction::South,
            shaded: c % 2 == 1,
            label: Some(column_letter(c - 1)),
        },
        (0, r) => RulerMark {
            side: Direction::West,
            shaded: (r - 1) % 2 == 0,
            label: Some(row_number(r - 1)),
        },
        (_, r) => RulerMark {
            side: Direction::East,
            shaded: (r - 1) % 2 == 1,
            label: Some(row_number(r - 1)),
        },
    }
}

fn column_letter(x: usize) -> String {
    char::from(b'A' + x as u8).to_string()
}

/// Rows count up from the bottom of the board
fn row_number(y: usize) -> String {
    (MAX_DIM - y).to_string()
}
