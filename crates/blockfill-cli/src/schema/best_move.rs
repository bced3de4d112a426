use blockfill_engine::{Board, Color, HAND_SIZE, Piece, PieceShape, UnknownPieceError};
use blockfill_evaluator::combination::Combination;
use serde::{Deserialize, Serialize};

/// Input of the `best-move` command.
///
/// ```json
/// {
///   "board": ["........", "...", ...],
///   "pieces": [{ "shape": "Hx2" }, { "shape": "2x2", "color": "#ff5e5e" }, ...]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMoveInput {
    pub board: Board,
    pub pieces: [PieceSpec; HAND_SIZE],
}

/// A catalog shape, optionally recolored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceSpec {
    pub shape: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PieceSpec {
    pub fn to_piece(&self) -> Result<Piece, UnknownPieceError> {
        let piece = PieceShape::from_name(&self.shape)?.to_piece(self.color.unwrap_or_default());
        Ok(piece)
    }
}

/// Answer of the `best-move` command.
///
/// Without a combination, `board` is the input board unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMoveOutput {
    pub combination: Option<Combination>,
    pub lines_cleared: usize,
    pub board: Board,
}
