//! Exhaustive three-piece lookahead.
//!
//! Given a board and a hand of three pieces, [`CombinationSearch`] considers
//! every ordering of the hand and, for each ordering, every sequence of legal
//! placements, clearing lines between placements. Each complete sequence is a
//! [`Combination`]; the one whose final board scores best wins.
//!
//! # How It Works
//!
//! 1. **Generate** - For each [`SlotOrder`], a depth-first search places the
//!    pieces one at a time. Every branch owns its own copy of the board. A
//!    branch that finds no legal placement for its next piece emits a partial
//!    combination and stops.
//! 2. **Filter** - Partial combinations are dropped. Complete ones are
//!    simulated on a copy of the starting board.
//! 3. **Deduplicate** - If the final board signature is already in the
//!    [`ResultCache`], the combination is dropped unscored.
//! 4. **Score** - Otherwise the [`FitnessEvaluator`] scores it and the score is
//!    recorded in the cache.
//! 5. **Select** - The first scored combination is the initial best; a later
//!    one replaces it only with a strictly greater fitness. Generation order
//!    (slot orders, then placement scan order) is therefore the tie-break.
//!
//! The search returns `None` if nothing survives the filter and deduplicate
//! steps, which callers treat as "no move left".
//!
//! # Cost
//!
//! The number of generated combinations is up to 6 × P³, where P is the
//! number of legal placements per piece (up to 64 on an empty 8×8 board).
//! Combinations are streamed through the pipeline rather than collected, so
//! memory use does not grow with that number.
//!
//! # Example
//!
//! ```
//! use blockfill_engine::{Board, Color, PieceShape};
//! use blockfill_evaluator::{
//!     combination_search::CombinationSearch, fitness::WeightedFitnessEvaluator,
//!     result_cache::FitnessCache,
//! };
//!
//! let board = Board::new(4);
//! let hand = ["Hx2", "Ix2", "2x2"]
//!     .map(|name| PieceShape::from_name(name).unwrap().to_piece(Color::PALETTE[0]));
//!
//! let search = CombinationSearch::new(Box::new(WeightedFitnessEvaluator::default()));
//! let best = search.find_best_combination(&board, &hand, &mut FitnessCache::new());
//! assert!(best.is_some_and(|c| c.fitness().is_some()));
//! ```

use blockfill_engine::{Board, Color, HAND_SIZE, Piece, Placement, find_placements};

use crate::{
    combination::{Combination, SlotOrder},
    fitness::{CombinationAnalysis, FitnessEvaluator},
    result_cache::ResultCache,
};

/// Counters of one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Combinations produced by the depth-first search, partial ones included.
    pub generated: usize,
    /// Combinations dropped because some piece could not be placed.
    pub incomplete: usize,
    /// Combinations dropped because their final board was already cached.
    pub cached: usize,
    /// Combinations handed to the fitness evaluator.
    pub scored: usize,
}

#[derive(Debug)]
pub struct CombinationSearch<'a> {
    evaluator: Box<dyn FitnessEvaluator + 'a>,
}

impl<'a> CombinationSearch<'a> {
    #[must_use]
    pub fn new(evaluator: Box<dyn FitnessEvaluator + 'a>) -> Self {
        Self { evaluator }
    }

    /// Returns the best-scoring combination, or `None` if no combination survives.
    pub fn find_best_combination<C>(
        &self,
        board: &Board,
        hand: &[Piece; HAND_SIZE],
        cache: &mut C,
    ) -> Option<Combination>
    where
        C: ResultCache + ?Sized,
    {
        let mut best: Option<(f32, Combination)> = None;
        self.for_each_scored_combination(board, hand, cache, |fitness, combination| {
            if best.as_ref().is_none_or(|(best_fitness, _)| fitness > *best_fitness) {
                best = Some((fitness, combination));
            }
        });
        best.map(|(_, combination)| combination)
    }

    /// Returns every combination that was scored, in generation order.
    pub fn scored_combinations<C>(
        &self,
        board: &Board,
        hand: &[Piece; HAND_SIZE],
        cache: &mut C,
    ) -> Vec<Combination>
    where
        C: ResultCache + ?Sized,
    {
        let mut scored = vec![];
        self.for_each_scored_combination(board, hand, cache, |_, combination| {
            scored.push(combination);
        });
        scored
    }

    /// Runs the generate, filter, deduplicate and score steps, passing each
    /// scored combination to `f`.
    pub fn for_each_scored_combination<C, F>(
        &self,
        board: &Board,
        hand: &[Piece; HAND_SIZE],
        cache: &mut C,
        mut f: F,
    ) -> SearchStats
    where
        C: ResultCache + ?Sized,
        F: FnMut(f32, Combination),
    {
        let mut stats = SearchStats::default();
        for order in SlotOrder::all() {
            for_each_combination_in_order(board, hand, order, &mut |mut combination| {
                stats.generated += 1;
                if !combination.is_complete() {
                    stats.incomplete += 1;
                    return;
                }

                let simulation = combination.simulate(board);
                let signature = simulation.board.signature();
                if cache.contains(&signature) {
                    stats.cached += 1;
                    return;
                }

                let analysis = CombinationAnalysis::from_simulation(simulation);
                let fitness = self.evaluator.evaluate(&analysis);
                cache.insert(signature, fitness);
                combination.set_fitness(fitness);
                stats.scored += 1;
                f(fitness, combination);
            });
        }

        log::debug!(
            "searched {} combinations: {} incomplete, {} cached, {} scored",
            stats.generated,
            stats.incomplete,
            stats.cached,
            stats.scored
        );
        stats
    }
}

/// Collects every combination (partial ones included) for a single slot order.
#[must_use]
pub fn combinations_in_order(
    board: &Board,
    hand: &[Piece; HAND_SIZE],
    order: SlotOrder,
) -> Vec<Combination> {
    let mut combinations = vec![];
    for_each_combination_in_order(board, hand, order, &mut |c| combinations.push(c));
    combinations
}

/// Generates every combination for a single slot order, depth first.
///
/// Placements of the piece at depth `d` (slot `order[d]`) are enumerated
/// against the branch's board, which already has the earlier pieces placed and
/// lines cleared. If none exists, the combination built so far is emitted with
/// [`Placement::EMPTY`] for the remaining slots.
pub fn for_each_combination_in_order<F>(
    board: &Board,
    hand: &[Piece; HAND_SIZE],
    order: SlotOrder,
    f: &mut F,
) where
    F: FnMut(Combination),
{
    let colors = hand.each_ref().map(Piece::color);
    let placements = [Placement::EMPTY, Placement::EMPTY, Placement::EMPTY];
    place_next(0, board, hand, order, &colors, placements, f);
}

fn place_next<F>(
    depth: usize,
    board: &Board,
    hand: &[Piece; HAND_SIZE],
    order: SlotOrder,
    colors: &[Color; HAND_SIZE],
    placements: [Placement; HAND_SIZE],
    f: &mut F,
) where
    F: FnMut(Combination),
{
    if depth == HAND_SIZE {
        f(Combination::new(placements, *colors, order));
        return;
    }

    let slot = order.slots()[depth];
    let piece = &hand[slot];
    let candidates = find_placements(piece, board);
    if candidates.is_empty() {
        log::trace!("slot {slot} ({}) has no placement at depth {depth}", piece.name());
        f(Combination::new(placements, *colors, order));
        return;
    }

    for placement in candidates {
        let mut branch = board.clone();
        branch.place(placement.cells(), Some(piece.color()));
        branch.clear_full_lines();

        let mut next = placements.clone();
        next[slot] = placement;
        place_next(depth + 1, &branch, hand, order, colors, next, f);
    }
}
