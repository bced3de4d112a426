//! Fitness evaluation: scoring the board a combination leaves behind.
//!
//! A combination is simulated on a copy of the board; the resulting
//! [`CombinationAnalysis`] bundles the lines cleared on the way with lazily
//! computed [`BoardAnalysis`] metrics of the final board. A
//! [`FitnessEvaluator`] turns that analysis into a single score, higher being
//! better.
//!
//! # Weighted Fitness
//!
//! [`WeightedFitnessEvaluator`] is a linear combination of the metrics:
//!
//! ```text
//! fitness =  w.lines_cleared          * lines_cleared
//!          - w.filled_cells           * filled_cells
//!          - w.holes                  * holes
//!          - w.bumpiness              * bumpiness
//!          + w.closeness              * closeness
//!          - w.distance_to_edge       * distance_to_edge
//!          + w.almost_completed_lines * (almost_completed_rows + almost_completed_cols)
//!          - w.small_islands          * small_islands
//! ```
//!
//! With the default weights, emptier boards whose remaining cells hug the
//! edges in compact groups score best.

use std::fmt;

use blockfill_engine::Board;

use crate::{
    board_analysis::BoardAnalysis,
    combination::{Combination, Simulation},
    weights::FitnessWeights,
};

/// Lines cleared by a combination together with metrics of the final board.
#[derive(Debug)]
pub struct CombinationAnalysis {
    lines_cleared: usize,
    board_analysis: BoardAnalysis,
}

impl CombinationAnalysis {
    #[must_use]
    pub fn from_board(before: &Board, combination: &Combination) -> Self {
        Self::from_simulation(combination.simulate(before))
    }

    #[must_use]
    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            lines_cleared: simulation.lines_cleared,
            board_analysis: BoardAnalysis::from_board(simulation.board),
        }
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}

/// Scores the outcome of a combination (higher is better).
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, analysis: &CombinationAnalysis) -> f32;
}

impl<T> FitnessEvaluator for &T
where
    T: FitnessEvaluator + ?Sized,
{
    fn evaluate(&self, analysis: &CombinationAnalysis) -> f32 {
        (**self).evaluate(analysis)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeightedFitnessEvaluator {
    weights: FitnessWeights,
}

impl WeightedFitnessEvaluator {
    #[must_use]
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }
}

impl FitnessEvaluator for WeightedFitnessEvaluator {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, analysis: &CombinationAnalysis) -> f32 {
        let w = &self.weights;
        let board = analysis.board_analysis();
        w.lines_cleared * analysis.lines_cleared() as f32
            - w.filled_cells * board.filled_cells() as f32
            - w.holes * board.holes() as f32
            - w.bumpiness * board.bumpiness() as f32
            + w.closeness * board.closeness()
            - w.distance_to_edge * board.distance_to_edge() as f32
            + w.almost_completed_lines * board.almost_completed_lines() as f32
            - w.small_islands * board.small_islands() as f32
    }
}

#[cfg(test)]
mod tests {
    use blockfill_engine::{Color, Placement, Position};

    use super::*;
    use crate::combination::SlotOrder;

    fn single(x: u8, y: u8) -> Placement {
        Placement::new(vec![Position::new(x, y)])
    }

    fn analysis_of(board: &str) -> CombinationAnalysis {
        CombinationAnalysis::from_simulation(Simulation {
            board: Board::from_ascii(board).unwrap(),
            lines_cleared: 0,
        })
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let evaluator = WeightedFitnessEvaluator::default();
        let analysis = analysis_of("....\n....\n....\n....");
        assert!(evaluator.evaluate(&analysis).abs() < f32::EPSILON);
    }

    #[test]
    fn test_weighted_sum() {
        let analysis = analysis_of(
            r"
            ....
            ....
            .#..
            ....
            ",
        );
        // filled 1, holes 1, bumpiness 4, closeness 1, distance 1, almost 0, islands 1
        let evaluator = WeightedFitnessEvaluator::default();
        let expected = -80.0 - 20.0 - 4.0 + 10.0 - 37.0 - 30.0;
        assert!((evaluator.evaluate(&analysis) - expected).abs() < 1e-4);

        let only_closeness = WeightedFitnessEvaluator::new(FitnessWeights {
            lines_cleared: 0.0,
            filled_cells: 0.0,
            holes: 0.0,
            bumpiness: 0.0,
            closeness: 2.5,
            distance_to_edge: 0.0,
            almost_completed_lines: 0.0,
            small_islands: 0.0,
        });
        assert!((only_closeness.evaluate(&analysis) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_lines_cleared_are_counted_across_steps() {
        let board = Board::from_ascii("##.\n...\n...").unwrap();
        let combination = Combination::new(
            [single(2, 0), single(0, 2), single(1, 2)],
            [Color::DEFAULT; 3],
            SlotOrder::all()[0],
        );
        let analysis = CombinationAnalysis::from_board(&board, &combination);
        assert_eq!(analysis.lines_cleared(), 1);
        assert_eq!(analysis.board_analysis().filled_cells(), 2);

        let evaluator = WeightedFitnessEvaluator::new(FitnessWeights {
            lines_cleared: 100.0,
            ..FitnessWeights::default()
        });
        let baseline = WeightedFitnessEvaluator::default();
        let diff = evaluator.evaluate(&analysis) - baseline.evaluate(&analysis);
        assert!((diff - 100.0).abs() < 1e-3);
    }
}
