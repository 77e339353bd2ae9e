/// State of a single grid position.
///
/// `neighbor_mines` is only meaningful once mines have been placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Whether the cell is a revealed number that can be chorded.
    pub const fn is_chordable(self) -> bool {
        self.is_revealed && self.neighbor_mines > 0
    }

    pub(crate) fn reveal(&mut self) {
        self.is_flagged = false;
        self.is_revealed = true;
    }
}
