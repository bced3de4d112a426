use blockfill_engine::{Board, GameStats, PieceSeed};
use blockfill_evaluator::{result_cache::CacheScope, weights::FitnessWeights};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Results of an `auto-play` run together with the settings it was played with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Timestamp when the run finished (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    pub board_size: usize,
    pub cache_scope: CacheScope,
    pub turn_limit: Option<usize>,
    pub weights: FitnessWeights,
    /// One entry per game, in game order
    pub games: Vec<GameResult>,
}

/// Outcome of a single game.
///
/// Replaying `seed` on a board of the same size with the same weights and
/// [`CacheScope::Decision`] reproduces the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: PieceSeed,
    /// Number of hands placed
    pub turns: usize,
    /// `false` if the game was stopped by the turn limit
    pub game_over: bool,
    pub stats: GameStats,
    pub final_board: Board,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_layout() {
        let record = PlayRecord {
            recorded_at: DateTime::from_timestamp(0, 0).unwrap(),
            board_size: 2,
            cache_scope: CacheScope::Decision,
            turn_limit: None,
            weights: FitnessWeights::default(),
            games: vec![GameResult {
                seed: PieceSeed::from_bytes([0xab; 16]),
                turns: 0,
                game_over: true,
                stats: GameStats::new(),
                final_board: Board::from_ascii("#.\n..").unwrap(),
            }],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["recorded_at"], "1970-01-01T00:00:00Z");
        assert_eq!(json["cache_scope"], "decision");
        assert_eq!(json["games"][0]["seed"], "ab".repeat(16));
        assert_eq!(json["games"][0]["final_board"], serde_json::json!(["#.", ".."]));

        let back: PlayRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.games[0].final_board, record.games[0].final_board);
    }
}
