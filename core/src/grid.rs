use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Fixed-size row-major storage of [`Cell`]s.
///
/// Indexing outside the grid is a programming error and panics; callers are
/// expected to validate coordinates with [`GameConfig::validate_coords`] first.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            cols.try_into().expect("width fits in Coord"),
            rows.try_into().expect("height fits in Coord"),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn get(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) {
        self[coords] = cell;
    }

    /// Flat row-major index, `y * width + x`.
    pub fn index_of(&self, (x, y): Coord2) -> CellCount {
        CellCount::from(y) * CellCount::from(self.size().0) + CellCount::from(x)
    }

    /// Inverse of [`Grid::index_of`].
    pub fn coords_of(&self, index: CellCount) -> Coord2 {
        let width = CellCount::from(self.size().0);
        let x = index % width;
        let y = index / width;
        (
            x.try_into().expect("x fits in Coord"),
            y.try_into().expect("y fits in Coord"),
        )
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        self.cells.rows().into_iter().map(|row| row.into_iter())
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        let size = self.size();
        self.cells.get(coords.to_nd_index()).unwrap_or_else(|| {
            panic!(
                "Cannot access position {:?} on grid with size {}x{}",
                coords, size.0, size.1
            )
        })
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        let size = self.size();
        self.cells.get_mut(coords.to_nd_index()).unwrap_or_else(|| {
            panic!(
                "Cannot mut-access position {:?} on grid with size {}x{}",
                coords, size.0, size.1
            )
        })
    }
}
