//! Core data structures: the board, pieces and placements.
//!
//! - [`Board`] - `size × size` grid of [`Cell`]s with placement and line clearing
//! - [`Piece`] / [`PieceShape`] - polyominoes as relative offsets plus a color
//! - [`Placement`] - absolute cells of one piece at one anchor
//! - [`find_placements`] - enumerates every legal placement of a piece

pub use self::{board::*, color::*, piece::*, placement::*};

pub(crate) mod board;
pub(crate) mod color;
pub(crate) mod piece;
pub(crate) mod placement;
