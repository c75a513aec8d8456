use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one tile must stay safe")]
    TooManyMines,
    #[error("Board must be at least one tile wide and tall")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
