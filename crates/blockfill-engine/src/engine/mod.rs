//! Game rules on top of the core data structures.
//!
//! - [`GameSession`] - Live board, hand of three pieces and session state
//! - [`GameStats`] - Score, combo and placement counters
//! - [`PieceGenerator`] - Seeded random piece dealer
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. A hand of three pieces is dealt
//! 2. The player places the pieces one at a time, in any order
//! 3. After each placement, full rows and columns are cleared
//! 4. Once the hand is used up, a new one is dealt
//! 5. The game ends when the player finds no way to place the hand

pub use self::{game_session::*, game_stats::*, piece_generator::*};

mod game_session;
mod game_stats;
mod piece_generator;
