//! Map sessions: the shared selector plus the current grid generation

use crate::board::{layout, BoardLayout};
use crate::ViewError;
use kazhard_autotile::{cliff, SheetCell, SheetConfig, VariantSelector};
use kazhard_core::{build, TacticalGrid, TerrainGrid};
use log::info;
use std::sync::Arc;

/// A viewer's live state.
///
/// Each [`load`](Self::load) builds a whole new grid and layout; readers
/// holding the previous generation's `Arc`s keep a consistent snapshot.
#[derive(Debug)]
pub struct MapSession<H> {
    selector: Arc<VariantSelector<H>>,
    grid: Arc<TacticalGrid>,
    layout: Arc<BoardLayout<H>>,
    generation: u64,
}

impl<H: Clone> MapSession<H> {
    /// Start a session at generation 1
    pub fn new(selector: Arc<VariantSelector<H>>, terrain: &TerrainGrid) -> Result<Self, ViewError> {
        let grid = Arc::new(build(terrain)?);
        let layout = Arc::new(layout(&grid, &selector));
        Ok(Self {
            selector,
            grid,
            layout,
            generation: 1,
        })
    }

    /// Replace the current generation, returning its number
    pub fn load(&mut self, terrain: &TerrainGrid) -> Result<u64, ViewError> {
        let grid = build(terrain)?;
        let board = layout(&grid, &self.selector);

        self.grid = Arc::new(grid);
        self.layout = Arc::new(board);
        self.generation += 1;
        info!(
            "Loaded map generation {}: {} ramps",
            self.generation,
            self.grid.ramp_count()
        );
        Ok(self.generation)
    }
}

impl MapSession<SheetCell> {
    /// Session over the cliff rules, bound to a configured sheet
    pub fn from_sheet(config: &SheetConfig, terrain: &TerrainGrid) -> Result<Self, ViewError> {
        let selector = cliff::is_raised_switch(config.catalog()?)?;
        Self::new(Arc::new(selector), terrain)
    }
}

impl<H> MapSession<H> {
    pub fn selector(&self) -> &Arc<VariantSelector<H>> {
        &self.selector
    }

    pub fn grid(&self) -> &Arc<TacticalGrid> {
        &self.grid
    }

    pub fn layout(&self) -> &Arc<BoardLayout<H>> {
        &self.layout
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
