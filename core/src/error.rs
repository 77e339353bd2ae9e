use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid board dimensions")]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay free")]
    TooManyMines,
    #[error("Incorrect number of flags")]
    IncorrectFlagCount,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
