use serde::{Deserialize, Serialize};

/// Coefficients of the fitness function.
///
/// Every term is a non-negative magnitude; whether it rewards or penalizes is
/// fixed by [`WeightedFitnessEvaluator`](crate::fitness::WeightedFitnessEvaluator).
/// Fields missing from a JSON document take their default value.
///
/// ```
/// use blockfill_evaluator::weights::FitnessWeights;
///
/// let weights: FitnessWeights = serde_json::from_str(r#"{ "holes": 5.0 }"#)?;
/// assert_eq!(weights.holes, 5.0);
/// assert_eq!(weights.filled_cells, FitnessWeights::default().filled_cells);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Reward per line cleared during the combination.
    pub lines_cleared: f32,
    /// Penalty per filled cell on the final board.
    pub filled_cells: f32,
    pub holes: f32,
    pub bumpiness: f32,
    /// Reward for compact fill (filled cells over bounding-box area).
    pub closeness: f32,
    pub distance_to_edge: f32,
    /// Reward per row or column with one or two empty cells.
    pub almost_completed_lines: f32,
    pub small_islands: f32,
}

impl FitnessWeights {
    pub const DEFAULT: Self = Self {
        lines_cleared: 0.0,
        filled_cells: 80.0,
        holes: 20.0,
        bumpiness: 1.0,
        closeness: 10.0,
        distance_to_edge: 37.0,
        almost_completed_lines: 60.0,
        small_islands: 30.0,
    };
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
