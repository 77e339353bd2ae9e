use std::io::{self, BufRead, Write};

use sweeper_core::{Board, Coord, GameError, MarkOutcome, RevealOutcome};

use crate::command::{Command, CoordinateOrder, USAGE, to_coords};
use crate::render::BoardView;

/// The interactive game loop: one turn per executed command, reading commands
/// line by line and printing the board before every prompt.
pub struct Session {
    board: Board,
    order: CoordinateOrder,
}

impl Session {
    pub fn new(board: Board, order: CoordinateOrder) -> Self {
        Self { board, order }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        loop {
            self.board.next_turn();
            if self.board.check_win() {
                writeln!(out, "You win!")?;
            }
            write!(out, "{}", BoardView::new(&self.board))?;
            if self.board.is_over() {
                writeln!(out, "Game over!")?;
            }

            match self.read_command(input, out)? {
                Command::Quit => {
                    log::debug!("Quit after {} turns", self.board.turns());
                    return Ok(());
                }
                command => self.execute(command, out)?,
            }
        }
    }

    /// Prompts until a command that takes a turn is entered. Printing the board
    /// and malformed lines are handled here without consuming a turn.
    fn read_command<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<Command> {
        let mut line = String::new();
        loop {
            write!(out, " > ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(Command::Quit);
            }

            match Command::parse(&line, self.order, self.board.size().0) {
                Command::Print { reveal_all: false } => {
                    write!(out, "{}", BoardView::new(&self.board))?
                }
                Command::Print { reveal_all: true } => {
                    write!(out, "{}", BoardView::revealed(&self.board))?
                }
                Command::Empty => {}
                Command::Unknown => writeln!(out, "{USAGE}")?,
                command => return Ok(command),
            }
        }
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        match command {
            Command::Reveal { x, y } => {
                match to_coords(x, y).and_then(|coords| self.board.reveal(coords)) {
                    Ok(RevealOutcome::HitMine) => log::info!("Revealed a mine at ({x}, {y})"),
                    Ok(_) => {}
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::Flag { x, y } => {
                match to_coords(x, y).and_then(|coords| self.board.toggle_flag(coords)) {
                    Ok(MarkOutcome::NoChange) => writeln!(out, "Cannot flag a revealed cell")?,
                    Ok(MarkOutcome::Changed) => {}
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::New { size } => {
                let size = size
                    .map(|(width, height)| {
                        match (Coord::try_from(width), Coord::try_from(height)) {
                            (Ok(width), Ok(height)) => Ok((width, height)),
                            _ => Err(GameError::InvalidSize),
                        }
                    })
                    .transpose();
                if let Err(err) =
                    size.and_then(|size| self.board.new_game(size, rand::random()))
                {
                    writeln!(out, "Cannot start a new game: {err}")?;
                }
            }
            Command::Print { .. } | Command::Quit | Command::Empty | Command::Unknown => {}
        }
        Ok(())
    }
}
