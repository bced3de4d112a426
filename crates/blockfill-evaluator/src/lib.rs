//! Move selection for the block placement puzzle.
//!
//! This crate decides where to put the three pieces of a hand. It looks at
//! every order in which the pieces can be played and every legal placement
//! sequence for that order, simulates each sequence including line clears,
//! and keeps the one whose final board looks best.
//!
//! # Architecture
//!
//! ```text
//! Auto Play (drive a GameSession turn by turn)
//!     ↓ uses
//! Combination Search (enumerate, deduplicate, select)
//!     ↓ uses                ↓ uses
//! Fitness Evaluation     Result Cache
//!     ↓ uses
//! Board Analysis (lazy board metrics)
//! ```
//!
//! - [`combination`] - A placement per hand slot plus the order they are
//!   applied in, and the simulation of that sequence on a board
//! - [`combination_search`] - Exhaustive search over slot orders and
//!   placements, with tie-breaking by generation order
//! - [`fitness`] - The [`FitnessEvaluator`](fitness::FitnessEvaluator) trait
//!   and its weighted implementation
//! - [`weights`] - Fitness coefficients, loadable from JSON
//! - [`board_analysis`] - Lazily computed board metrics (holes, bumpiness,
//!   small islands, ...)
//! - [`result_cache`] - Fitness memoized by final board signature
//! - [`auto_play`] - Applies search results to a live game session
//!
//! # Example
//!
//! ```
//! use blockfill_engine::{GameSession, PieceSeed};
//! use blockfill_evaluator::{
//!     auto_play::AutoPlayer,
//!     combination_search::CombinationSearch,
//!     fitness::WeightedFitnessEvaluator,
//!     result_cache::{CacheScope, FitnessCache},
//!     weights::FitnessWeights,
//! };
//!
//! let evaluator = WeightedFitnessEvaluator::new(FitnessWeights::default());
//! let search = CombinationSearch::new(Box::new(evaluator));
//! let mut player = AutoPlayer::new(search, FitnessCache::new(), CacheScope::Decision);
//!
//! let mut session = GameSession::with_seed(5, PieceSeed::from_bytes([0; 16]));
//! player.play_session(&mut session, 1)?;
//! # Ok::<(), blockfill_engine::PlacementError>(())
//! ```
//!
//! # Limitations
//!
//! - The lookahead ends with the current hand; pieces of the next hand are unknown.
//! - With a cache shared across searches, a search can discard every
//!   combination whose final board was already seen and report no move even
//!   though legal moves exist. [`CacheScope::Decision`](result_cache::CacheScope)
//!   avoids this at the cost of re-scoring boards.

pub mod auto_play;
pub mod board_analysis;
pub mod combination;
pub mod combination_search;
pub mod fitness;
pub mod result_cache;
pub mod weights;
