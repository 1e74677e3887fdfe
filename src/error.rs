use thiserror::Error;

#[derive(Error, Debug)]
pub enum SquaresError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid hand notation: {0}")]
    InvalidHandNotation(String),

    #[error("A line holds at most 5 cards, got {0}")]
    OversizedHand(usize),

    #[error("Cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("Cell index {0} out of range (0..25)")]
    CellOutOfRange(usize),

    #[error("Card {0} has already been dealt")]
    CardAlreadyDealt(String),

    #[error("No moves to undo")]
    NothingToUndo,

    #[error("Grid is already full")]
    GridFull,

    #[error("Grid is not full: {0} of 25 cells filled")]
    GridNotFull(usize),

    #[error("No legal cell remains for this move")]
    NoLegalCell,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type SquaresResult<T> = Result<T, SquaresError>;
