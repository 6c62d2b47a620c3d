//! Raw terrain input for grid construction

use crate::{GridError, BORDERED_DIM, RAW_TILE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain of a single raw cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    RampBase,
}

impl TerrainKind {
    /// Numeric code used by hand-authored grids (0 floor, 1 wall, 2 ramp base)
    pub fn code(self) -> u8 {
        match self {
            TerrainKind::Floor => 0,
            TerrainKind::Wall => 1,
            TerrainKind::RampBase => 2,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
            TerrainKind::RampBase => '^',
        }
    }

    pub fn from_glyph(glyph: char) -> Result<Self, GridError> {
        match glyph {
            '.' => Ok(TerrainKind::Floor),
            '#' => Ok(TerrainKind::Wall),
            '^' => Ok(TerrainKind::RampBase),
            other => Err(GridError::UnknownTerrainGlyph(other)),
        }
    }
}

impl TryFrom<u8> for TerrainKind {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TerrainKind::Floor),
            1 => Ok(TerrainKind::Wall),
            2 => Ok(TerrainKind::RampBase),
            other => Err(GridError::UnknownTerrainCode(other)),
        }
    }
}

/// A `BORDERED_DIM` x `BORDERED_DIM` terrain map, row-major, border ring included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TerrainKind>", into = "Vec<TerrainKind>")]
pub struct TerrainGrid {
    cells: Vec<TerrainKind>,
}

impl TerrainGrid {
    pub fn from_cells(cells: Vec<TerrainKind>) -> Result<Self, GridError> {
        if cells.len() != RAW_TILE_COUNT {
            return Err(GridError::TerrainSize {
                expected: RAW_TILE_COUNT,
                actual: cells.len(),
            });
        }
        Ok(Self { cells })
    }

    /// Build from numeric codes, one row per inner array
    pub fn from_codes(rows: &[[u8; BORDERED_DIM]; BORDERED_DIM]) -> Result<Self, GridError> {
        let cells = rows
            .iter()
            .flatten()
            .map(|&code| TerrainKind::try_from(code))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }

    /// Parse one line of glyphs per row. Blank lines and surrounding
    /// whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BORDERED_DIM {
            return Err(GridError::MalformedAscii(format!(
                "expected {} rows, got {}",
                BORDERED_DIM,
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(RAW_TILE_COUNT);
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != BORDERED_DIM {
                return Err(GridError::MalformedAscii(format!(
                    "row {} has {} columns, expected {}",
                    row, width, BORDERED_DIM
                )));
            }
            for glyph in line.chars() {
                cells.push(TerrainKind::from_glyph(glyph)?);
            }
        }
        Self::from_cells(cells)
    }

    /// Open floor surrounded by a wall ring
    pub fn walled() -> Self {
        let cells = (0..RAW_TILE_COUNT)
            .map(|i| {
                if is_ring_position(i % BORDERED_DIM, i / BORDERED_DIM) {
                    TerrainKind::Wall
                } else {
                    TerrainKind::Floor
                }
            })
            .collect();
        Self { cells }
    }

    /// The hand-authored test map: walls on the ring, a few cliff lines
    /// and scattered ramp bases
    pub fn sample() -> Self {
        Self {
            cells: SAMPLE.iter().flatten().copied().collect(),
        }
    }

    pub fn cells(&self) -> &[TerrainKind] {
        &self.cells
    }

    /// Terrain at raw position (border ring included)
    pub fn get(&self, col: usize, row: usize) -> Result<TerrainKind, GridError> {
        let index = raw_index(col, row)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, col: usize, row: usize, kind: TerrainKind) -> Result<(), GridError> {
        let index = raw_index(col, row)?;
        self.cells[index] = kind;
        Ok(())
    }
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::walled()
    }
}

impl TryFrom<Vec<TerrainKind>> for TerrainGrid {
    type Error = GridError;

    fn try_from(cells: Vec<TerrainKind>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<TerrainGrid> for Vec<TerrainKind> {
    fn from(grid: TerrainGrid) -> Self {
        grid.cells
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BORDERED_DIM) {
            for kind in row {
                write!(f, "{}", kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Check if a raw position lies on the outermost ring
pub fn is_ring_position(col: usize, row: usize) -> bool {
    col == 0 || row == 0 || col == BORDERED_DIM - 1 || row == BORDERED_DIM - 1
}

fn raw_index(col: usize, row: usize) -> Result<usize, GridError> {
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
    Ok(row * BORDERED_DIM + col)
}

const F: TerrainKind = TerrainKind::Floor;
const W: TerrainKind = TerrainKind::Wall;
const R: TerrainKind = TerrainKind::RampBase;

#[rustfmt::skip]
const SAMPLE: [[TerrainKind; BORDERED_DIM]; BORDERED_DIM] = [
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W],
    [W, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, R, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, W, W, W, F, W, F, F, F, F, F, W],
    [W, F, F, F, F, W, W, W, W, F, W, W, F, F, F, F, F, W],
    [W, W, W, W, R, W, F, F, F, W, W, W, W, R, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, W, W, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, W, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, R, F, F, F, F, F, W],
    [W, F, W, W, W, W, W, F, F, F, F, F, F, F, F, F, F, W],
    [W, W, W, W, W, W, W, W, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, W, W, W, W, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, R, R, R, R, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, W],
    [W, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, W],
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W],
];
