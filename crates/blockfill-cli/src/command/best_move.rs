use std::path::PathBuf;

use anyhow::Context;
use blockfill_evaluator::{
    combination_search::CombinationSearch, fitness::WeightedFitnessEvaluator,
    result_cache::FitnessCache,
};

use crate::{
    schema::best_move::{BestMoveInput, BestMoveOutput},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Board and pieces file (JSON format)
    input: PathBuf,
    /// Fitness weights file (JSON format); missing fields use the built-in weights
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg {
        input,
        weights,
        output,
    } = arg;

    let BestMoveInput { board, pieces } = util::read_json_file("board", input)?;
    let to_piece = |slot: usize| {
        pieces[slot]
            .to_piece()
            .with_context(|| format!("Invalid piece in slot {slot}"))
    };
    let hand = [to_piece(0)?, to_piece(1)?, to_piece(2)?];

    let weights = util::load_weights(weights.as_deref())?;
    let search = CombinationSearch::new(Box::new(WeightedFitnessEvaluator::new(weights)));
    let best = search.find_best_combination(&board, &hand, &mut FitnessCache::new());

    let answer = match best {
        Some(combination) => {
            let simulation = combination.simulate(&board);
            eprintln!(
                "Best combination: fitness {:?}, {} lines cleared",
                combination.fitness(),
                simulation.lines_cleared
            );
            eprintln!("{}", simulation.board);
            BestMoveOutput {
                combination: Some(combination),
                lines_cleared: simulation.lines_cleared,
                board: simulation.board,
            }
        }
        None => {
            eprintln!("No combination places all three pieces");
            BestMoveOutput {
                combination: None,
                lines_cleared: 0,
                board,
            }
        }
    };

    Output::save_json(&answer, output.as_deref())?;
    Ok(())
}
