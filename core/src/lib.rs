use core::ops::BitOr;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod types;

pub const DEFAULT_SIZE: Coord2 = (20, 20);
pub const DEFAULT_MINES: CellCount = 70;
/// Largest accepted width or height.
pub const MAX_DIMENSION: Coord = 1024;

/// Board dimensions and mine count.
///
/// Always holds dimensions in `1..=MAX_DIMENSION` and leaves at least one free
/// cell, so mine placement is guaranteed to terminate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Result<Self> {
        let dimensions = 1..=MAX_DIMENSION;
        if !dimensions.contains(&size_x) || !dimensions.contains(&size_y) {
            log::warn!("Rejected board size {size_x}x{size_y}");
            return Err(GameError::InvalidSize);
        }
        let total_cells = mult(size_x, size_y);
        if mines >= total_cells {
            log::warn!("Rejected {mines} mines, board only has {total_cells} cells");
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            size: (size_x, size_y),
            mines,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size;
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            mines: DEFAULT_MINES,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
