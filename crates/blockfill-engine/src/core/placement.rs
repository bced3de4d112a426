use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Position},
    piece::Piece,
};

/// Absolute cells covered by one piece at one anchor.
///
/// The empty placement ([`Placement::EMPTY`]) marks a slot for which no legal
/// placement exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placement {
    cells: Vec<Position>,
}

impl Placement {
    pub const EMPTY: Self = Self { cells: Vec::new() };

    #[must_use]
    pub fn new(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Places `piece` with its origin at `anchor`.
    ///
    /// Returns `None` if a cell would fall at a negative coordinate. The result
    /// is not checked against any board.
    #[must_use]
    pub fn at(piece: &Piece, anchor: Position) -> Option<Self> {
        let cells = piece
            .offsets()
            .iter()
            .map(|&(dx, dy)| anchor.offset(dx, dy))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { cells })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns the anchor at which `piece` produces exactly this placement.
    #[must_use]
    pub fn anchor_of(&self, piece: &Piece) -> Option<Position> {
        let (&first, &(dx, dy)) = self.cells.first().zip(piece.offsets().first())?;
        let anchor = first.offset(dx.checked_neg()?, dy.checked_neg()?)?;
        (Self::at(piece, anchor)? == *self).then_some(anchor)
    }

    /// Returns `true` if every cell is on the board and empty.
    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        self.cells
            .iter()
            .all(|pos| board.is_empty_at(pos.x(), pos.y()))
    }
}

/// Enumerates every legal placement of `piece` on `board`.
///
/// Anchors are scanned with `x` in the outer loop and `y` in the inner loop,
/// both ascending. The order of the returned placements follows that scan and
/// is relied upon as the tie-break order of the search.
///
/// # Example
///
/// ```
/// use blockfill_engine::{Board, Color, PieceShape, find_placements};
///
/// let board = Board::new(3);
/// let piece = PieceShape::from_name("Hx2")?.to_piece(Color::DEFAULT);
/// // 2 horizontal anchors in each of 3 rows
/// assert_eq!(find_placements(&piece, &board).len(), 6);
/// # Ok::<(), blockfill_engine::UnknownPieceError>(())
/// ```
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn find_placements(piece: &Piece, board: &Board) -> Vec<Placement> {
    let size = board.size();
    let mut placements = vec![];
    for x in 0..size {
        for y in 0..size {
            // size <= Board::MAX_SIZE
            let anchor = Position::new(x as u8, y as u8);
            if let Some(placement) = Placement::at(piece, anchor).filter(|p| p.fits(board)) {
                placements.push(placement);
            }
        }
    }
    placements
}
