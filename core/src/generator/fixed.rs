use super::*;

/// Places mines at a fixed list of coordinates, ignoring the safe cell.
///
/// Used to set up known layouts; coordinates must already be in range.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMinePlacer<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MinePlacer for FixedMinePlacer<'_> {
    fn place(self, grid: &mut Grid, _mines: CellCount, _safe: Coord2) -> CellCount {
        self.mines
            .iter()
            .filter(|&&coords| plant_mine(grid, coords))
            .count()
            .try_into()
            .unwrap()
    }
}
