use crate::{
    PlacementError,
    core::{board::Board, piece::Piece, placement::Placement},
};

use super::{
    GameStats,
    piece_generator::{HAND_SIZE, PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A game in progress: the live board, the hand of pieces and the score.
///
/// A new hand of three pieces is dealt once every piece of the current hand
/// has been placed. The session never decides on its own that the game is
/// over; whoever drives it calls [`GameSession::end_game`] when no move is
/// left.
///
/// # Example
///
/// ```
/// use blockfill_engine::{GameSession, PieceSeed, find_placements};
///
/// let mut session = GameSession::with_seed(8, PieceSeed::from_bytes([1; 16]));
/// let piece = session.hand()[0].clone().unwrap();
/// let placement = find_placements(&piece, session.board()).remove(0);
///
/// session.place_piece(0, &placement)?;
/// assert!(session.hand()[0].is_none());
/// assert_eq!(session.stats().placed_pieces(), 1);
/// # Ok::<(), blockfill_engine::PlacementError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    hand: [Option<Piece>; HAND_SIZE],
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    /// Starts a game on an empty `size × size` board with a random seed.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::from_board(Board::new(size), PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(size: usize, seed: PieceSeed) -> Self {
        Self::from_board(Board::new(size), PieceGenerator::with_seed(seed))
    }

    /// Starts a game on an existing board, dealing the first hand from `generator`.
    #[must_use]
    pub fn from_board(board: Board, mut generator: PieceGenerator) -> Self {
        let hand = generator.draw_hand();
        Self::with_hand(board, hand, generator)
    }

    /// Starts a game on an existing board with a given first hand.
    #[must_use]
    pub fn with_hand(board: Board, hand: [Piece; HAND_SIZE], generator: PieceGenerator) -> Self {
        let mut stats = GameStats::new();
        stats.deal_hand();
        Self {
            board,
            hand: hand.map(Some),
            generator,
            stats,
            session_state: SessionState::Playing,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces in hand, by slot; placed pieces leave an empty slot.
    #[must_use]
    pub fn hand(&self) -> &[Option<Piece>; HAND_SIZE] {
        &self.hand
    }

    /// Returns the hand if no piece of it has been placed yet.
    #[must_use]
    pub fn pieces_in_hand(&self) -> Option<[Piece; HAND_SIZE]> {
        let [Some(a), Some(b), Some(c)] = &self.hand else {
            return None;
        };
        Some([a.clone(), b.clone(), c.clone()])
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    /// Places the piece of `slot` at `placement`.
    ///
    /// `placement` must be the piece's shape at some anchor and cover only
    /// empty cells of the board. On success the piece is painted in its color,
    /// full lines are cleared and the slot is emptied. Returns the number of
    /// cleared lines.
    pub fn place_piece(
        &mut self,
        slot: usize,
        placement: &Placement,
    ) -> Result<usize, PlacementError> {
        if self.session_state.is_game_over() {
            return Err(PlacementError::GameOver);
        }
        let piece = self
            .hand
            .get(slot)
            .and_then(Option::as_ref)
            .ok_or(PlacementError::EmptySlot { slot })?;
        if placement.anchor_of(piece).is_none() {
            return Err(PlacementError::ShapeMismatch { slot });
        }
        for pos in placement.cells() {
            let (x, y) = (pos.x(), pos.y());
            let cell = self
                .board
                .cell(x, y)
                .ok_or(PlacementError::OutOfBounds { x, y })?;
            if cell.is_filled() {
                return Err(PlacementError::Occupied { x, y });
            }
        }

        let color = piece.color();
        self.board.place(placement.cells(), Some(color));
        let cleared_lines = self.board.clear_full_lines();
        self.stats.complete_placement(placement.len(), cleared_lines);
        self.hand[slot] = None;

        if self.hand.iter().all(Option::is_none) {
            self.hand = self.generator.draw_hand().map(Some);
            self.stats.deal_hand();
        }
        Ok(cleared_lines)
    }

    pub fn end_game(&mut self) {
        self.session_state = SessionState::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceShape, Position, find_placements};

    fn piece(name: &str) -> Piece {
        PieceShape::from_name(name).unwrap().to_piece(Color::PALETTE[3])
    }

    fn session_with(board: &str, hand: [&str; 3]) -> GameSession {
        GameSession::with_hand(
            Board::from_ascii(board).unwrap(),
            hand.map(piece),
            PieceGenerator::with_seed(PieceSeed::from_bytes([0; 16])),
        )
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::with_seed(8, PieceSeed::from_bytes([3; 16]));
        assert_eq!(session.board().size(), 8);
        assert!(session.pieces_in_hand().is_some());
        assert!(session.session_state().is_playing());
        assert_eq!(session.stats().hands_dealt(), 1);
    }

    #[test]
    fn test_place_piece_clears_line() {
        let mut session = session_with("###.\n....\n....\n....", ["Hx2", "Hx2", "Hx2"]);
        let placement = Placement::new(vec![Position::new(3, 0), Position::new(3, 1)]);
        assert_eq!(
            session.place_piece(0, &placement),
            Err(PlacementError::ShapeMismatch { slot: 0 })
        );

        let mut session = session_with("##..\n....\n....\n....", ["Hx2", "Hx2", "Hx2"]);
        let placement = Placement::at(&piece("Hx2"), Position::new(2, 0)).unwrap();
        assert_eq!(session.place_piece(1, &placement), Ok(1));
        assert_eq!(session.board().count_filled(), 0);
        assert_eq!(session.board().cell(2, 0).unwrap().color(), Color::DEFAULT);
        assert!(session.hand()[1].is_none());
        assert!(session.pieces_in_hand().is_none());
        assert_eq!(session.stats().score(), 2 + 10);
    }

    #[test]
    fn test_place_piece_paints_color() {
        let mut session = session_with("....\n....\n....\n....", ["T", "Ix2", "Hx2"]);
        let placement = Placement::at(&piece("Ix2"), Position::new(1, 1)).unwrap();
        session.place_piece(1, &placement).unwrap();
        assert_eq!(session.board().cell(1, 2).unwrap().color(), Color::PALETTE[3]);
        assert!(session.board().is_filled(1, 1));
    }

    #[test]
    fn test_place_piece_errors() {
        let mut session = session_with("#...\n....\n....\n....", ["Hx2", "Ix2", "2x2"]);

        let occupied = Placement::at(&piece("Hx2"), Position::new(0, 0)).unwrap();
        assert_eq!(
            session.place_piece(0, &occupied),
            Err(PlacementError::Occupied { x: 0, y: 0 })
        );

        let outside = Placement::at(&piece("Ix2"), Position::new(0, 3)).unwrap();
        assert_eq!(
            session.place_piece(1, &outside),
            Err(PlacementError::OutOfBounds { x: 0, y: 4 })
        );

        assert_eq!(
            session.place_piece(5, &occupied),
            Err(PlacementError::EmptySlot { slot: 5 })
        );

        let ok = Placement::at(&piece("2x2"), Position::new(2, 2)).unwrap();
        session.place_piece(2, &ok).unwrap();
        assert_eq!(
            session.place_piece(2, &ok),
            Err(PlacementError::EmptySlot { slot: 2 })
        );

        // failed attempts leave the board untouched
        assert_eq!(session.board().count_filled(), 5);
    }

    #[test]
    fn test_new_hand_after_all_slots_used() {
        let mut session = GameSession::with_seed(8, PieceSeed::from_bytes([9; 16]));
        for slot in 0..3 {
            let piece = session.hand()[slot].clone().unwrap();
            let placement = find_placements(&piece, session.board()).remove(0);
            session.place_piece(slot, &placement).unwrap();
        }
        assert!(session.pieces_in_hand().is_some());
        assert_eq!(session.stats().hands_dealt(), 2);
        assert_eq!(session.stats().placed_pieces(), 3);
    }

    #[test]
    fn test_end_game() {
        let mut session = session_with("..\n..", ["Hx2", "Hx2", "Hx2"]);
        session.end_game();
        assert!(session.session_state().is_game_over());
        let placement = Placement::at(&piece("Hx2"), Position::new(0, 0)).unwrap();
        assert_eq!(
            session.place_piece(0, &placement),
            Err(PlacementError::GameOver)
        );
    }
}
