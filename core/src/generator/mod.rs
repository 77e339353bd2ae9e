use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy used to arm a fresh grid with mines.
pub trait MinePlacer {
    /// Places `mines` mines into `grid`, never at `safe`, and derives every
    /// cell's neighbor count. Returns how many mines were actually placed.
    fn place(self, grid: &mut Grid, mines: CellCount, safe: Coord2) -> CellCount;
}

/// Turns the cell at `coords` into a mine and bumps the count of every
/// non-mine neighbor. Returns `false` if it already was a mine.
pub(crate) fn plant_mine(grid: &mut Grid, coords: Coord2) -> bool {
    let cell = &mut grid[coords];
    if cell.is_mine {
        return false;
    }
    cell.is_mine = true;
    cell.neighbor_mines = 0;

    for pos in grid.iter_neighbors(coords) {
        let neighbor = &mut grid[pos];
        if !neighbor.is_mine {
            neighbor.neighbor_mines += 1;
        }
    }
    true
}
