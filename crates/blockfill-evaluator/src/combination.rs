//! Combinations: one placement per hand slot, applied in a given order.

use arrayvec::ArrayVec;
use blockfill_engine::{Board, Color, HAND_SIZE, Placement};
use serde::{Deserialize, Serialize};

/// Returns every ordering of `items`.
///
/// The first element is fixed first and the remaining elements are permuted
/// recursively, so the identity ordering comes first and orderings appear in
/// lexicographic order of their indices.
///
/// ```
/// use blockfill_evaluator::combination::permutations;
///
/// assert_eq!(
///     permutations(&['a', 'b', 'c']),
///     [
///         ['a', 'b', 'c'],
///         ['a', 'c', 'b'],
///         ['b', 'a', 'c'],
///         ['b', 'c', 'a'],
///         ['c', 'a', 'b'],
///         ['c', 'b', 'a'],
///     ]
/// );
/// ```
#[must_use]
pub fn permutations<T>(items: &[T]) -> Vec<Vec<T>>
where
    T: Clone,
{
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = vec![];
    for (i, first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first.clone());
            result.push(tail);
        }
    }
    result
}

/// Sequence in which the three hand slots are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotOrder([usize; HAND_SIZE]);

impl SlotOrder {
    pub const COUNT: usize = 6;

    /// All orderings of the slots, in the order the search explores them.
    #[must_use]
    pub fn all() -> ArrayVec<Self, { SlotOrder::COUNT }> {
        permutations(&[0, 1, 2])
            .into_iter()
            .map(|perm| Self([perm[0], perm[1], perm[2]]))
            .collect()
    }

    #[must_use]
    pub fn slots(self) -> [usize; HAND_SIZE] {
        self.0
    }
}

/// Positions, colors and application order of the three pieces of a hand.
///
/// `placements` and `colors` are indexed by hand slot, not by application
/// order. A combination that could not place every piece keeps
/// [`Placement::EMPTY`] for the unplaced slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    placements: [Placement; HAND_SIZE],
    colors: [Color; HAND_SIZE],
    order: SlotOrder,
    fitness: Option<f32>,
}

/// Final board after applying a combination, with the number of lines cleared on the way.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub board: Board,
    pub lines_cleared: usize,
}

impl Combination {
    #[must_use]
    pub fn new(
        placements: [Placement; HAND_SIZE],
        colors: [Color; HAND_SIZE],
        order: SlotOrder,
    ) -> Self {
        Self {
            placements,
            colors,
            order,
            fitness: None,
        }
    }

    #[must_use]
    pub fn placements(&self) -> &[Placement; HAND_SIZE] {
        &self.placements
    }

    #[must_use]
    pub fn colors(&self) -> &[Color; HAND_SIZE] {
        &self.colors
    }

    #[must_use]
    pub fn order(&self) -> SlotOrder {
        self.order
    }

    /// Score of this combination; `None` until it has been evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f32) {
        self.fitness = Some(fitness);
    }

    /// Returns `true` if every slot has a placement.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placements.iter().all(|p| !p.is_empty())
    }

    /// Iterates over `(slot, placement, color)` in application order.
    pub fn steps(&self) -> impl Iterator<Item = (usize, &Placement, Color)> + '_ {
        self.order
            .slots()
            .into_iter()
            .map(|slot| (slot, &self.placements[slot], self.colors[slot]))
    }

    /// Applies the combination to a copy of `board`, clearing lines after every step.
    #[must_use]
    pub fn simulate(&self, board: &Board) -> Simulation {
        let mut board = board.clone();
        let mut lines_cleared = 0;
        for (_slot, placement, color) in self.steps() {
            board.place(placement.cells(), Some(color));
            lines_cleared += board.clear_full_lines();
        }
        Simulation {
            board,
            lines_cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use blockfill_engine::Position;

    use super::*;

    #[test]
    fn test_six_distinct_slot_orders() {
        let orders = SlotOrder::all();
        assert_eq!(orders.len(), 6);
        let distinct: HashSet<_> = orders.iter().collect();
        assert_eq!(distinct.len(), 6);
        for order in &orders {
            let mut slots = order.slots();
            slots.sort_unstable();
            assert_eq!(slots, [0, 1, 2]);
        }
        assert_eq!(orders[0].slots(), [0, 1, 2]);
        assert_eq!(orders[5].slots(), [2, 1, 0]);
    }

    #[test]
    fn test_permutations_of_small_inputs() {
        assert_eq!(permutations::<u8>(&[]), [Vec::<u8>::new()]);
        assert_eq!(permutations(&[1]), [[1]]);
        assert_eq!(permutations(&[1, 2, 3, 4]).len(), 24);
    }

    fn row_placement(y: u8, xs: std::ops::Range<u8>) -> Placement {
        Placement::new(xs.map(|x| Position::new(x, y)).collect())
    }

    #[test]
    fn test_steps_follow_order() {
        let combination = Combination::new(
            [
                row_placement(0, 0..1),
                row_placement(1, 0..2),
                row_placement(2, 0..3),
            ],
            [Color::PALETTE[0], Color::PALETTE[1], Color::PALETTE[2]],
            SlotOrder([2, 0, 1]),
        );
        let steps: Vec<_> = combination
            .steps()
            .map(|(slot, placement, color)| (slot, placement.len(), color))
            .collect();
        assert_eq!(
            steps,
            [
                (2, 3, Color::PALETTE[2]),
                (0, 1, Color::PALETTE[0]),
                (1, 2, Color::PALETTE[1]),
            ]
        );
    }

    #[test]
    fn test_simulate_clears_between_steps() {
        let board = Board::new(3);
        // slot 0 fills row 0 and is cleared before slot 1 lands in the same cells
        let combination = Combination::new(
            [
                row_placement(0, 0..3),
                row_placement(0, 0..1),
                row_placement(2, 2..3),
            ],
            [Color::PALETTE[0]; 3],
            SlotOrder([0, 1, 2]),
        );
        let simulation = combination.simulate(&board);
        assert_eq!(simulation.lines_cleared, 1);
        assert_eq!(simulation.board.count_filled(), 2);
        assert!(simulation.board.is_filled(0, 0));
        assert!(simulation.board.is_filled(2, 2));
        assert_eq!(board.count_filled(), 0);
    }

    #[test]
    fn test_is_complete() {
        let mut placements = [
            row_placement(0, 0..1),
            row_placement(1, 0..1),
            row_placement(2, 0..1),
        ];
        let order = SlotOrder::all()[0];
        assert!(Combination::new(placements.clone(), [Color::DEFAULT; 3], order).is_complete());

        placements[1] = Placement::EMPTY;
        assert!(!Combination::new(placements, [Color::DEFAULT; 3], order).is_complete());
    }
}
