use std::{
    iter, panic,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use anyhow::Context;
use blockfill_engine::{Board, GameSession, PieceSeed};
use blockfill_evaluator::{
    auto_play::AutoPlayer,
    combination_search::CombinationSearch,
    fitness::WeightedFitnessEvaluator,
    result_cache::{CacheScope, ResultCache, SharedFitnessCache},
};
use chrono::Utc;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    schema::record::{GameResult, PlayRecord},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Width and height of the board
    #[clap(long, default_value_t = Board::DEFAULT_SIZE, value_parser = parse_board_size)]
    size: usize,
    /// Seed of the first game (32 hex digits); seeds of later games are derived from it
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Fitness weights file (JSON format); missing fields use the built-in weights
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Lifetime of the fitness cache: `process` or `decision`
    #[clap(long, default_value = "process")]
    cache_scope: CacheScope,
    /// Stop each game after this many turns
    #[clap(long)]
    turn_limit: Option<usize>,
    /// Number of games played in parallel
    #[clap(long, default_value_t = 1)]
    jobs: usize,
    /// Print the final board of each game
    #[clap(long, default_value_t = false)]
    show_boards: bool,
    /// Output file path for the play record (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if (1..=Board::MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("board size must be between 1 and {}", Board::MAX_SIZE))
    }
}

pub fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        size,
        seed,
        weights,
        cache_scope,
        turn_limit,
        jobs,
        show_boards,
        output,
    } = arg;

    let weights = util::load_weights(weights.as_deref())?;
    let seeds = game_seeds(*seed, *games);
    let jobs = (*jobs).clamp(1, (*games).max(1));

    eprintln!("Playing {games} games on a {size}x{size} board with {jobs} threads...");

    let cache = SharedFitnessCache::new();
    let next_game = AtomicUsize::new(0);
    let worker = || -> anyhow::Result<Vec<(usize, GameResult)>> {
        let search = CombinationSearch::new(Box::new(WeightedFitnessEvaluator::new(weights)));
        let mut player = AutoPlayer::new(search, cache.clone(), *cache_scope);
        let mut results = vec![];
        loop {
            let index = next_game.fetch_add(1, Ordering::Relaxed);
            let Some(&seed) = seeds.get(index) else {
                break;
            };
            let result = play_game(&mut player, *size, seed, *turn_limit)?;
            report_game(index, *games, &result, *show_boards);
            results.push((index, result));
        }
        Ok(results)
    };

    let mut results = thread::scope(|s| {
        let handles = (0..jobs).map(|_| s.spawn(worker)).collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<anyhow::Result<Vec<_>>>()
    })?
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    results.sort_by_key(|(index, _)| *index);
    let games = results.into_iter().map(|(_, result)| result).collect::<Vec<_>>();

    print_summary(&games);
    if *cache_scope == CacheScope::Process {
        eprintln!("Fitness cache holds {} boards", cache.len());
    }

    let record = PlayRecord {
        recorded_at: Utc::now(),
        board_size: *size,
        cache_scope: *cache_scope,
        turn_limit: *turn_limit,
        weights,
        games,
    };
    Output::save_json(&record, output.as_deref())?;

    Ok(())
}

/// Seeds for `games` games: `first` (or a random seed), then seeds drawn from
/// a generator seeded with it.
fn game_seeds(first: Option<PieceSeed>, games: usize) -> Vec<PieceSeed> {
    let first = first.unwrap_or_else(rand::random);
    let mut rng = Pcg32::from_seed(first.to_bytes());
    iter::once(first)
        .chain(iter::repeat_with(|| rng.random()))
        .take(games)
        .collect()
}

fn play_game<C>(
    player: &mut AutoPlayer<'_, C>,
    size: usize,
    seed: PieceSeed,
    turn_limit: Option<usize>,
) -> anyhow::Result<GameResult>
where
    C: ResultCache,
{
    let mut session = GameSession::with_seed(size, seed);
    let turns = player
        .play_session(&mut session, turn_limit.unwrap_or(usize::MAX))
        .with_context(|| format!("Failed to play game with seed {seed}"))?;
    log::debug!(
        "game {seed} finished after {turns} turns, cache holds {} boards",
        player.cache().len()
    );
    Ok(GameResult {
        seed,
        turns,
        game_over: session.session_state().is_game_over(),
        stats: session.stats().clone(),
        final_board: session.board().clone(),
    })
}

fn report_game(index: usize, games: usize, result: &GameResult, show_board: bool) {
    let stats = &result.stats;
    let mut line = format!(
        "Game {}/{games} ({}): score {}, {} pieces, {} lines, max combo {}",
        index + 1,
        result.seed,
        stats.score(),
        stats.placed_pieces(),
        stats.total_cleared_lines(),
        stats.max_combo(),
    );
    if !result.game_over {
        line.push_str(" (turn limit reached)");
    }
    if show_board {
        line.push('\n');
        line.push_str(&result.final_board.to_string());
    }
    eprintln!("{line}");
}

#[expect(clippy::cast_precision_loss)]
fn print_summary(games: &[GameResult]) {
    let Some(best) = games.iter().map(|game| game.stats.score()).max() else {
        return;
    };
    let total = games.iter().map(|game| game.stats.score()).sum::<usize>();
    eprintln!(
        "Played {} games: mean score {:.1}, best score {best}",
        games.len(),
        total as f64 / games.len() as f64
    );
}

#[cfg(test)]
mod tests {
    use blockfill_evaluator::weights::FitnessWeights;

    use super::*;

    #[test]
    fn test_game_seeds_start_with_given_seed() {
        let first = PieceSeed::from_bytes([7; 16]);
        let seeds = game_seeds(Some(first), 4);
        assert_eq!(seeds.len(), 4);
        assert_eq!(seeds[0], first);
        assert_eq!(seeds, game_seeds(Some(first), 4));
        assert_ne!(seeds[1], seeds[2]);
        assert!(game_seeds(None, 0).is_empty());
    }

    #[test]
    fn test_parse_board_size() {
        assert_eq!(parse_board_size("8"), Ok(8));
        assert_eq!(parse_board_size("16"), Ok(16));
        assert!(parse_board_size("0").is_err());
        assert!(parse_board_size("17").is_err());
        assert!(parse_board_size("eight").is_err());
    }

    #[test]
    fn test_play_game_respects_turn_limit() {
        let mut player = AutoPlayer::new(
            CombinationSearch::new(Box::new(WeightedFitnessEvaluator::new(
                FitnessWeights::default(),
            ))),
            SharedFitnessCache::new(),
            CacheScope::Decision,
        );
        let result = play_game(&mut player, 5, PieceSeed::from_bytes([1; 16]), Some(1)).unwrap();
        assert!(result.turns <= 1);
        assert_eq!(result.stats.placed_pieces(), result.turns * 3);
        assert_eq!(result.final_board.size(), 5);
    }
}
