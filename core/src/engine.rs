use core::ops::BitOr;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    /// No mines placed yet, waiting for the first reveal.
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// A single game: the grid, its configuration, the seed used to arm it and
/// the turn counter.
///
/// Mines are placed lazily by the first [`Board::reveal`], which is guaranteed
/// to land on a safe cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    grid: Grid,
    seed: u64,
    state: GameState,
    turns: u64,
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::debug!(
            "New {}x{} board with {} mines, seed {:x}",
            config.size.0,
            config.size.1,
            config.mines,
            seed
        );
        Self {
            config,
            grid: Grid::new(config.size),
            seed,
            state: GameState::default(),
            turns: 0,
        }
    }

    /// Builds an already armed board with mines at the given coordinates.
    ///
    /// The configured mine count is taken from the layout.
    pub fn with_layout(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let mut config = GameConfig::new(size, 0)?;
        for &coords in mines {
            config.validate_coords(coords)?;
        }

        let mut grid = Grid::new(size);
        let placed = FixedMinePlacer::new(mines).place(&mut grid, 0, (0, 0));
        config = GameConfig::new(size, placed)?;

        Ok(Self {
            config,
            grid,
            seed: 0,
            state: GameState::Active,
            turns: 0,
        })
    }

    /// Throws the current game away and starts over with `seed`.
    ///
    /// The board is resized when `size` is given, keeping the mine count. An
    /// invalid size leaves the current game untouched.
    pub fn new_game(&mut self, size: Option<Coord2>, seed: u64) -> Result<()> {
        let config = match size {
            Some(size) => GameConfig::new(size, self.config.mines)?,
            None => self.config,
        };
        *self = Self::new(config, seed);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        !self.state.is_ready()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Advances the turn counter, called once per game loop iteration.
    pub fn next_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|cell| cell.is_flagged)
            .count()
            .try_into()
            .unwrap()
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines) - i64::from(self.flagged_count())
    }

    /// Places the mines, keeping `safe` free. Only the first call per game has
    /// any effect.
    pub fn arm(&mut self, safe: Coord2) -> Result<()> {
        let safe = self.config.validate_coords(safe)?;
        if self.is_armed() {
            return Ok(());
        }
        RandomMinePlacer::new(self.seed).place(&mut self.grid, self.config.mines, safe);
        self.state = GameState::Active;
        Ok(())
    }

    /// Player reveal at `coords`.
    ///
    /// Arms the board on the first call. A revealed numbered cell is chorded;
    /// a hidden or flagged cell is revealed and flood-filled, losing the game
    /// if it holds a mine.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;
        self.arm(coords)?;

        let cell = self.grid[coords];
        if cell.is_revealed {
            return if cell.is_chordable() {
                self.chord_reveal(coords)
            } else {
                Ok(RevealOutcome::NoChange)
            };
        }

        self.reveal_cell(coords);
        if cell.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.state = GameState::Lost;
            Ok(RevealOutcome::HitMine)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals `coords` and floods through every connected zero-count cell.
    ///
    /// Already revealed cells are left alone, flags on revealed cells are
    /// cleared. Returns how many cells were newly revealed. Does not decide
    /// the game outcome.
    pub fn reveal_cell(&mut self, coords: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.grid[visit_coords];
            if cell.is_revealed {
                continue;
            }
            cell.reveal();
            revealed += 1;

            if cell.is_mine || cell.neighbor_mines > 0 {
                continue;
            }

            to_visit.extend(
                self.grid
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| !self.grid[pos].is_revealed),
            );
        }

        log::trace!("Revealed {} cells from {:?}", revealed, coords);
        revealed
    }

    /// Reveals every non-mine neighbor of a revealed numbered cell, provided
    /// the number of flagged neighbors matches its count.
    ///
    /// Mine neighbors are skipped even when a flag sits on a safe cell, so a
    /// chord never loses the game.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.grid[coords];
        if !cell.is_chordable() {
            return Ok(RevealOutcome::NoChange);
        }
        if self.count_flagged_neighbors(coords) != cell.neighbor_mines {
            return Err(GameError::IncorrectFlagCount);
        }

        Ok(self
            .grid
            .iter_neighbors(coords)
            .map(|pos| self.chord_neighbor(pos))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange))
    }

    fn chord_neighbor(&mut self, coords: Coord2) -> RevealOutcome {
        if self.grid[coords].is_mine || self.reveal_cell(coords) == 0 {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flips the flag on an unrevealed cell. Revealed cells are left as is.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.grid[coords];
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }
        cell.is_flagged = !cell.is_flagged;
        Ok(MarkOutcome::Changed)
    }

    /// Returns `(correctly_flagged_mines, unrevealed_cells)`, where unrevealed
    /// cells are those neither flagged nor revealed.
    pub fn tally(&self) -> (CellCount, CellCount) {
        let mut correctly_flagged_mines = 0;
        let mut unrevealed_cells = 0;
        for cell in self.grid.iter() {
            if cell.is_flagged {
                if cell.is_mine {
                    correctly_flagged_mines += 1;
                }
            } else if !cell.is_revealed {
                unrevealed_cells += 1;
            }
        }
        (correctly_flagged_mines, unrevealed_cells)
    }

    /// Ends the game as won once the cells still covered are exactly the
    /// mines, flagging every mine. Returns whether the game was won by this
    /// call.
    pub fn check_win(&mut self) -> bool {
        if !matches!(self.state, GameState::Active) {
            return false;
        }

        let (correctly_flagged_mines, unrevealed_cells) = self.tally();
        if correctly_flagged_mines + unrevealed_cells != self.config.mines {
            return false;
        }

        for cell in self.grid.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_flagged = true;
        }
        self.state = GameState::Won;
        log::debug!("Game won after {} turns", self.turns);
        true
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos].is_flagged)
            .count()
            .try_into()
            .unwrap()
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_layout(size, mines).unwrap()
    }

    fn all_coords(board: &Board) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = board.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    fn mine_set(board: &Board) -> Vec<Coord2> {
        all_coords(board)
            .filter(|&pos| board.cell_at(pos).is_mine)
            .collect()
    }

    /// Finds a seed that puts the only mine of a `size` board at `target` when
    /// the first reveal is `safe`.
    fn seed_for_single_mine(size: Coord2, safe: Coord2, target: Coord2) -> u64 {
        let config = GameConfig::new(size, 1).unwrap();
        (0..10_000)
            .find(|&seed| {
                let mut board = Board::new(config, seed);
                board.arm(safe).unwrap();
                board.cell_at(target).is_mine
            })
            .expect("no seed places the mine at the target")
    }

    #[test]
    fn first_reveal_is_always_safe() {
        let config = GameConfig::new((6, 6), 35).unwrap();
        for seed in 0..32 {
            let mut board = Board::new(config, seed);

            let outcome = board.reveal((2, 3)).unwrap();

            assert_eq!(outcome, RevealOutcome::Revealed, "seed {seed}");
            assert!(!board.cell_at((2, 3)).is_mine);
            assert_eq!(mine_set(&board).len(), 35);
        }
    }

    #[test]
    fn placement_is_reproducible() {
        let config = GameConfig::new((12, 7), 20).unwrap();
        let mut a = Board::new(config, 0x5eed);
        let mut b = Board::new(config, 0x5eed);

        a.reveal((5, 5)).unwrap();
        b.reveal((5, 5)).unwrap();

        assert_eq!(mine_set(&a), mine_set(&b));
    }

    #[test]
    fn mines_are_placed_only_once() {
        let config = GameConfig::new((8, 8), 10).unwrap();
        let mut board = Board::new(config, 3);

        board.reveal((0, 0)).unwrap();
        let before = mine_set(&board);
        board.arm((7, 7)).unwrap();

        assert_eq!(mine_set(&board), before);
    }

    #[test]
    fn reveal_cell_is_idempotent() {
        let mut board = layout((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal_cell((0, 0)), 8);
        let snapshot = board.clone();

        assert_eq!(board.reveal_cell((0, 0)), 0);
        assert_eq!(board.reveal_cell((1, 1)), 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flood_stops_at_numbered_cells() {
        let mut board = layout((5, 5), &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);

        board.reveal((0, 2)).unwrap();

        for y in 0..5 {
            assert!(board.cell_at((0, y)).is_revealed);
            assert!(board.cell_at((1, y)).is_revealed);
            assert!(!board.cell_at((3, y)).is_revealed);
            assert!(!board.cell_at((4, y)).is_revealed);
        }
    }

    #[test]
    fn revealed_zero_cells_have_revealed_neighbors() {
        let config = GameConfig::new((30, 16), 60).unwrap();
        for seed in 0..16 {
            let mut board = Board::new(config, seed);
            board.reveal((15, 8)).unwrap();

            for pos in all_coords(&board) {
                let cell = board.cell_at(pos);
                if cell.is_revealed && !cell.is_mine && cell.neighbor_mines == 0 {
                    for neighbor in board.grid().iter_neighbors(pos) {
                        assert!(board.cell_at(neighbor).is_revealed, "seed {seed} at {pos:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn flood_clears_flags_it_passes_over() {
        let mut board = layout((4, 1), &[(3, 0)]);

        board.toggle_flag((1, 0)).unwrap();
        board.reveal((0, 0)).unwrap();

        assert!(board.cell_at((1, 0)).is_revealed);
        assert!(!board.cell_at((1, 0)).is_flagged);
        assert!(!board.cell_at((3, 0)).is_revealed);
    }

    #[test]
    fn single_mine_scenario_reveals_everything_else() {
        let seed = seed_for_single_mine((5, 5), (0, 0), (4, 4));
        let mut board = Board::new(GameConfig::new((5, 5), 1).unwrap(), seed);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(mine_set(&board), vec![(4, 4)]);
        assert_eq!(board.tally(), (0, 1));
        for pos in all_coords(&board) {
            assert_eq!(board.cell_at(pos).is_revealed, pos != (4, 4), "at {pos:?}");
        }
        assert!(board.check_win());
        assert!(board.cell_at((4, 4)).is_flagged);
    }

    #[test]
    fn revealing_mine_loses() {
        let mut board = layout((3, 3), &[(1, 1), (2, 2)]);

        let outcome = board.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(board.state(), GameState::Lost);
        assert!(board.is_over());
        assert_eq!(board.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(board.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn revealing_flagged_mine_still_loses() {
        let mut board = layout((2, 2), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert!(!board.cell_at((0, 0)).is_flagged);
    }

    #[test]
    fn out_of_range_moves_are_rejected() {
        let mut board = layout((3, 2), &[(0, 0)]);

        assert_eq!(board.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(board.chord_reveal((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flagging_revealed_cell_is_rejected() {
        let mut board = layout((3, 3), &[(2, 2)]);
        board.reveal((1, 1)).unwrap();
        let snapshot = board.clone();

        assert_eq!(board.toggle_flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut board = layout((3, 3), &[(2, 2)]);

        assert_eq!(board.toggle_flag((2, 2)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((2, 2)).unwrap(), MarkOutcome::Changed);
        assert!(board.cell_at((2, 2)).is_hidden());
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn flags_before_first_reveal_do_not_arm() {
        let config = GameConfig::new((4, 4), 3).unwrap();
        let mut board = Board::new(config, 9);

        board.toggle_flag((0, 0)).unwrap();

        assert!(!board.is_armed());
        assert!(mine_set(&board).is_empty());
        assert!(!board.check_win());
    }

    #[test]
    fn chord_reveal_with_matching_flags() {
        let mut board = layout((3, 3), &[(0, 1), (2, 1)]);

        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        board.toggle_flag((2, 1)).unwrap();

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        for pos in [(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2)] {
            assert!(board.cell_at(pos).is_revealed, "at {pos:?}");
        }
        assert!(board.check_win());
    }

    #[test]
    fn chord_with_wrong_flag_count_changes_nothing() {
        let mut board = layout((3, 3), &[(0, 1), (2, 1)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        let snapshot = board.clone();

        assert_eq!(board.chord_reveal((1, 1)), Err(GameError::IncorrectFlagCount));
        assert_eq!(board.reveal((1, 1)), Err(GameError::IncorrectFlagCount));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn chord_skips_mines_despite_misplaced_flag() {
        let mut board = layout((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((2, 2)).unwrap();

        assert_eq!(board.chord_reveal((1, 1)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(board.state(), GameState::Active);
        assert!(!board.cell_at((0, 0)).is_revealed);
        assert!(board.cell_at((2, 2)).is_revealed);
        assert!(!board.cell_at((2, 2)).is_flagged);
    }

    #[test]
    fn chord_around_fully_revealed_cell_is_no_change() {
        let mut board = layout((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.chord_reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.chord_reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn chord_on_hidden_or_blank_cell_is_no_change() {
        let mut board = layout((3, 1), &[(2, 0)]);

        assert_eq!(board.chord_reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        board.reveal((0, 0)).unwrap();
        assert_eq!(board.chord_reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn win_when_only_mines_remain_covered() {
        let mut board = layout((2, 1), &[(0, 0)]);

        assert!(!board.check_win());
        board.reveal((1, 0)).unwrap();

        assert!(board.check_win());
        assert_eq!(board.state(), GameState::Won);
        assert!(board.cell_at((0, 0)).is_flagged);
        assert!(!board.check_win());
    }

    #[test]
    fn win_with_flagged_mine_and_everything_else_revealed() {
        let mut board = layout((3, 3), &[(1, 1)]);
        board.toggle_flag((1, 1)).unwrap();
        for pos in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
            board.reveal(pos).unwrap();
        }

        assert_eq!(board.tally(), (1, 0));
        assert!(board.check_win());
    }

    #[test]
    fn win_with_mix_of_flagged_and_covered_mines() {
        let mut board = layout((4, 1), &[(0, 0), (3, 0)]);
        board.toggle_flag((0, 0)).unwrap();
        board.reveal((1, 0)).unwrap();

        assert!(!board.check_win());
        board.reveal((2, 0)).unwrap();

        assert_eq!(board.tally(), (1, 1));
        assert!(board.check_win());
    }

    #[test]
    fn win_condition_ignores_flags_on_safe_cells() {
        let mut board = layout((3, 1), &[(0, 0)]);
        board.reveal((1, 0)).unwrap();
        board.toggle_flag((2, 0)).unwrap();

        assert_eq!(board.tally(), (0, 1));
        assert!(board.check_win());
    }

    #[test]
    fn covered_safe_cell_blocks_win() {
        let mut board = layout((3, 1), &[(0, 0)]);
        board.toggle_flag((0, 0)).unwrap();
        board.reveal((1, 0)).unwrap();

        assert_eq!(board.tally(), (1, 1));
        assert!(!board.check_win());
        assert_eq!(board.state(), GameState::Active);
    }

    #[test]
    fn mine_free_board_is_won_by_first_reveal() {
        let mut board = Board::new(GameConfig::new((4, 4), 0).unwrap(), 11);

        board.reveal((2, 2)).unwrap();

        assert!(board.check_win());
    }

    #[test]
    fn new_game_resets_state() {
        let mut board = Board::new(GameConfig::new((5, 5), 5).unwrap(), 1);
        board.next_turn();
        board.next_turn();
        board.reveal((0, 0)).unwrap();

        board.new_game(None, 2).unwrap();

        assert_eq!(board.seed(), 2);
        assert_eq!(board.turns(), 0);
        assert_eq!(board.state(), GameState::Ready);
        assert!(board.grid().iter().all(|&cell| cell == Cell::default()));
        assert_eq!(board.size(), (5, 5));
    }

    #[test]
    fn new_game_resizes_and_validates() {
        let mut board = Board::new(GameConfig::new((5, 5), 10).unwrap(), 1);

        board.new_game(Some((8, 3)), 4).unwrap();
        assert_eq!(board.size(), (8, 3));
        assert_eq!(board.mine_count(), 10);

        assert_eq!(board.new_game(Some((3, 3)), 5), Err(GameError::TooManyMines));
        assert_eq!(board.size(), (8, 3));
        assert_eq!(board.seed(), 4);
    }

    #[test]
    fn with_layout_rejects_bad_coordinates() {
        assert_eq!(
            Board::with_layout((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::with_layout((2, 1), &[(0, 0), (1, 0)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn large_blank_board_floods_completely() {
        let mut board = Board::new(GameConfig::new((400, 300), 0).unwrap(), 0);

        board.reveal((200, 150)).unwrap();

        assert_eq!(board.tally(), (0, 0));
    }
}
