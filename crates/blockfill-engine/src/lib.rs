pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown piece shape: {name}")]
pub struct UnknownPieceError {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("board must have between 1 and {max} rows, got {rows}")]
    InvalidSize { rows: usize, max: usize },
    #[display("row {y} must have exactly {expected} cells, got {actual}")]
    RowLength {
        y: usize,
        expected: usize,
        actual: usize,
    },
    #[display("invalid cell character {ch:?} at ({x}, {y})")]
    InvalidCell { x: usize, y: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("game is already over")]
    GameOver,
    #[display("hand slot {slot} holds no piece")]
    EmptySlot { slot: usize },
    #[display("placement does not match the shape of the piece in slot {slot}")]
    ShapeMismatch { slot: usize },
    #[display("placement leaves the board at ({x}, {y})")]
    OutOfBounds { x: usize, y: usize },
    #[display("cell ({x}, {y}) is already filled")]
    Occupied { x: usize, y: usize },
}
