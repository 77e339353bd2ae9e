use core::fmt;

use sweeper_core::{Board, Cell};

/// Text rendering of a board: seed line, column header, one line per row and a
/// footer with the remaining mines and the turn counter.
pub struct BoardView<'a> {
    board: &'a Board,
    reveal_all: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            reveal_all: false,
        }
    }

    /// Shows every cell as if revealed, marking flags on mines with `[x]`.
    pub fn revealed(board: &'a Board) -> Self {
        Self {
            board,
            reveal_all: true,
        }
    }

    fn cell_str(&self, cell: Cell) -> String {
        if self.board.is_over() && cell.is_mine {
            " [X]".into()
        } else if cell.is_flagged {
            if self.reveal_all && cell.is_mine {
                " [x]".into()
            } else {
                " [!]".into()
            }
        } else if cell.is_hidden() && !self.reveal_all {
            " [ ]".into()
        } else if cell.is_mine {
            " [X]".into()
        } else if cell.neighbor_mines > 0 {
            format!(" {:>3}", cell.neighbor_mines)
        } else {
            "    ".into()
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, _) = self.board.size();

        writeln!(f, "Seed: {:x}", self.board.seed())?;
        write!(f, "     ")?;
        for x in 0..width {
            write!(f, " {:>3}", x)?;
        }
        writeln!(f)?;
        writeln!(f, "   | {}", "----".repeat(usize::from(width)))?;

        for (y, row) in self.board.grid().rows().enumerate() {
            write!(f, "{:>3}| ", y)?;
            for &cell in row {
                write!(f, "{}", self.cell_str(cell))?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "   |  [{:>5}] [{:>5}]",
            self.board.mines_left(),
            self.board.turns()
        )
    }
}
