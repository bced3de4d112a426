use serde::{Deserialize, Serialize};

/// Points per cleared line, before the combo multiplier.
pub const SCORE_PER_LINE: usize = 10;

/// Score and counters of one game.
///
/// # Scoring
///
/// - Every placed cell is worth one point.
/// - A placement clearing `n > 0` lines raises the combo counter by one and
///   scores `n * SCORE_PER_LINE * combo` on top.
/// - A placement clearing nothing resets the combo counter.
///
/// # Example
///
/// ```
/// use blockfill_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(4, 1); // 4 + 1 * 10 * 1 = 14
/// stats.complete_placement(2, 2); // 2 + 2 * 10 * 2 = 42
///
/// assert_eq!(stats.score(), 56);
/// assert_eq!(stats.combo(), 2);
/// assert_eq!(stats.total_cleared_lines(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    placed_pieces: usize,
    hands_dealt: usize,
    total_cleared_lines: usize,
    combo: usize,
    max_combo: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placed_pieces: 0,
            hands_dealt: 0,
            total_cleared_lines: 0,
            combo: 0,
            max_combo: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn hands_dealt(&self) -> usize {
        self.hands_dealt
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Current number of consecutive placements that cleared lines.
    #[must_use]
    pub const fn combo(&self) -> usize {
        self.combo
    }

    #[must_use]
    pub const fn max_combo(&self) -> usize {
        self.max_combo
    }

    /// Updates statistics after a piece of `cells` cells was placed and
    /// `cleared_lines` rows and columns were cleared.
    pub const fn complete_placement(&mut self, cells: usize, cleared_lines: usize) {
        self.placed_pieces += 1;
        self.score += cells;
        if cleared_lines == 0 {
            self.combo = 0;
            return;
        }
        self.combo += 1;
        if self.combo > self.max_combo {
            self.max_combo = self.combo;
        }
        self.total_cleared_lines += cleared_lines;
        self.score += cleared_lines * SCORE_PER_LINE * self.combo;
    }

    pub const fn deal_hand(&mut self) {
        self.hands_dealt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_score_without_clear() {
        let mut stats = GameStats::new();
        stats.complete_placement(9, 0);
        stats.complete_placement(3, 0);
        assert_eq!(stats.score(), 12);
        assert_eq!(stats.placed_pieces(), 2);
        assert_eq!(stats.combo(), 0);
        assert_eq!(stats.max_combo(), 0);
    }

    #[test]
    fn test_combo_resets_after_quiet_placement() {
        let mut stats = GameStats::new();
        stats.complete_placement(1, 1);
        stats.complete_placement(1, 1);
        stats.complete_placement(1, 0);
        stats.complete_placement(1, 1);

        // 1+10, 1+20, 1, 1+10
        assert_eq!(stats.score(), 44);
        assert_eq!(stats.combo(), 1);
        assert_eq!(stats.max_combo(), 2);
        assert_eq!(stats.total_cleared_lines(), 3);
    }

    #[test]
    fn test_multi_line_clear_scales_with_combo() {
        let mut stats = GameStats::new();
        stats.complete_placement(4, 1);
        assert_eq!(stats.score(), 14);
        stats.complete_placement(2, 2);
        assert_eq!(stats.score(), 56);
        assert_eq!(stats.combo(), 2);
    }

    #[test]
    fn test_deal_hand() {
        let mut stats = GameStats::default();
        stats.deal_hand();
        stats.deal_hand();
        assert_eq!(stats.hands_dealt(), 2);
    }
}
