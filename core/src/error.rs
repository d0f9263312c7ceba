use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid row or column index")]
    InvalidCoords,
    #[error("Unknown board size: {0}")]
    UnknownBoardSize(String),
    #[error("Mine layout does not fit the board")]
    InvalidLayout,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell counters do not match the cells")]
    InconsistentCounters,
}

pub type Result<T> = core::result::Result<T, GameError>;
