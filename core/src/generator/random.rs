use super::*;

/// Seeded rejection sampling: draw a uniform cell index, skip the safe cell and
/// cells that already hold a mine, repeat until every mine is placed.
///
/// The same seed, safe cell, board size and mine count always produce the same
/// layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, grid: &mut Grid, mines: CellCount, safe: Coord2) -> CellCount {
        use rand::prelude::*;

        let total_cells = grid.total_cells();

        // one free cell is needed for the safe start, anything else would never terminate
        let mines = if mines >= total_cells {
            let fits = total_cells.saturating_sub(1);
            log::warn!(
                "Minefield too small, requested {} mines but only {} fit",
                mines,
                fits
            );
            fits
        } else {
            mines
        };

        let blocked = grid.index_of(safe);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws: u64 = 0;

        while mines_placed < mines {
            let place = rng.random_range(0..total_cells);
            draws += 1;
            if place == blocked {
                continue;
            }
            let coords = grid.coords_of(place);
            if plant_mine(grid, coords) {
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines with seed {:x} in {} draws",
            mines_placed,
            self.seed,
            draws
        );
        mines_placed
    }
}
