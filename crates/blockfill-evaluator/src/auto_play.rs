//! Autonomous play: driving a [`GameSession`] with the combination search.
//!
//! Each turn, the [`AutoPlayer`] searches the hand on the table and applies
//! the chosen combination to the live board step by step, in the same order
//! and with the same line clears as the search simulated. When the search
//! finds nothing, the game ends.

use blockfill_engine::{GameSession, PlacementError};

use crate::{
    combination::Combination,
    combination_search::CombinationSearch,
    result_cache::{CacheScope, FitnessCache, ResultCache},
};

/// Result of a single turn.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum TurnOutcome {
    /// The whole hand was placed.
    Played {
        combination: Combination,
        lines_cleared: usize,
    },
    /// No combination was found and the session was ended.
    GameOver,
}

#[derive(Debug)]
pub struct AutoPlayer<'a, C = FitnessCache> {
    search: CombinationSearch<'a>,
    cache: C,
    cache_scope: CacheScope,
}

impl<'a, C> AutoPlayer<'a, C>
where
    C: ResultCache,
{
    /// Creates a player.
    ///
    /// With [`CacheScope::Process`], `cache` is used by every search of this
    /// player. With [`CacheScope::Decision`], `cache` is left untouched and
    /// every search gets a fresh cache.
    #[must_use]
    pub fn new(search: CombinationSearch<'a>, cache: C, cache_scope: CacheScope) -> Self {
        Self {
            search,
            cache,
            cache_scope,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    #[must_use]
    pub fn cache_scope(&self) -> CacheScope {
        self.cache_scope
    }

    /// Searches the best combination for the hand currently dealt in `session`.
    ///
    /// The hand must be complete: a turn always places all three pieces.
    pub fn find_move(
        &mut self,
        session: &GameSession,
    ) -> Result<Option<Combination>, PlacementError> {
        if session.session_state().is_game_over() {
            return Err(PlacementError::GameOver);
        }
        let Some(hand) = session.pieces_in_hand() else {
            let slot = session
                .hand()
                .iter()
                .position(Option::is_none)
                .unwrap_or_default();
            return Err(PlacementError::EmptySlot { slot });
        };

        let board = session.board();
        let best = match self.cache_scope {
            CacheScope::Process => self
                .search
                .find_best_combination(board, &hand, &mut self.cache),
            CacheScope::Decision => {
                let mut cache = FitnessCache::new();
                self.search.find_best_combination(board, &hand, &mut cache)
            }
        };
        Ok(best)
    }

    /// Plays one turn: searches the hand and places it, or ends the game.
    pub fn play_turn(&mut self, session: &mut GameSession) -> Result<TurnOutcome, PlacementError> {
        let Some(combination) = self.find_move(session)? else {
            log::debug!(
                "no combination found after {} pieces, ending game",
                session.stats().placed_pieces()
            );
            session.end_game();
            return Ok(TurnOutcome::GameOver);
        };

        let mut lines_cleared = 0;
        for (slot, placement, _color) in combination.steps() {
            lines_cleared += session.place_piece(slot, placement)?;
        }
        log::trace!(
            "placed hand with fitness {:?}, cleared {lines_cleared} lines",
            combination.fitness()
        );
        Ok(TurnOutcome::Played {
            combination,
            lines_cleared,
        })
    }

    /// Plays turns until the game ends or `turn_limit` turns were played.
    ///
    /// Returns the number of turns in which a hand was placed.
    pub fn play_session(
        &mut self,
        session: &mut GameSession,
        turn_limit: usize,
    ) -> Result<usize, PlacementError> {
        let mut turns = 0;
        while turns < turn_limit {
            if self.play_turn(session)?.is_game_over() {
                break;
            }
            turns += 1;
        }
        Ok(turns)
    }
}
