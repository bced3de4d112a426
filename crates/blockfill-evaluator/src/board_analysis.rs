//! Lazy-evaluated board metrics.
//!
//! [`BoardAnalysis`] owns a board and computes each metric on first access,
//! caching the result. Evaluators that only need a few metrics pay only for
//! those.

use std::{cell::OnceCell, collections::VecDeque, iter};

use arrayvec::ArrayVec;
use blockfill_engine::Board;

type ColumnArray<T> = ArrayVec<T, { Board::MAX_SIZE }>;

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_heights: OnceCell<ColumnArray<usize>>,
    filled_cells: OnceCell<usize>,
    holes: OnceCell<usize>,
    bumpiness: OnceCell<usize>,
    closeness: OnceCell<f32>,
    distance_to_edge: OnceCell<usize>,
    almost_completed_rows: OnceCell<usize>,
    almost_completed_cols: OnceCell<usize>,
    small_islands: OnceCell<usize>,
}

impl BoardAnalysis {
    /// Minimum number of empty cells for a line to count as almost completed.
    pub const ALMOST_COMPLETED_MIN_EMPTY: usize = 1;
    /// Maximum number of empty cells for a line to count as almost completed.
    pub const ALMOST_COMPLETED_MAX_EMPTY: usize = 2;
    /// Largest connected group of filled cells that counts as a small island.
    pub const SMALL_ISLAND_MAX_SIZE: usize = 2;

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
            filled_cells: OnceCell::new(),
            holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
            closeness: OnceCell::new(),
            distance_to_edge: OnceCell::new(),
            almost_completed_rows: OnceCell::new(),
            almost_completed_cols: OnceCell::new(),
            small_islands: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Height of each column: `size - y` of its topmost filled cell, 0 if empty.
    #[must_use]
    pub fn column_heights(&self) -> &[usize] {
        self.column_heights.get_or_init(|| {
            let size = self.board.size();
            (0..size)
                .map(|x| {
                    (0..size)
                        .find(|&y| self.board.is_filled(x, y))
                        .map_or(0, |top| size - top)
                })
                .collect()
        })
    }

    #[must_use]
    pub fn filled_cells(&self) -> usize {
        *self
            .filled_cells
            .get_or_init(|| self.board.count_filled())
    }

    /// Empty cells with at least one filled cell above them in the same column.
    #[must_use]
    pub fn holes(&self) -> usize {
        *self.holes.get_or_init(|| {
            let size = self.board.size();
            iter::zip(0..size, self.column_heights())
                .map(|(x, &height)| {
                    let top = size - height;
                    (top..size).filter(|&y| !self.board.is_filled(x, y)).count()
                })
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| w[0].abs_diff(w[1]))
                .sum()
        })
    }

    /// Filled cells divided by the area of their bounding box, 0 for an empty board.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn closeness(&self) -> f32 {
        *self.closeness.get_or_init(|| {
            let mut positions = self.board.filled_positions();
            let Some(first) = positions.next() else {
                return 0.0;
            };
            let (mut min_x, mut max_x) = (first.x(), first.x());
            let (mut min_y, mut max_y) = (first.y(), first.y());
            for pos in positions {
                min_x = min_x.min(pos.x());
                max_x = max_x.max(pos.x());
                min_y = min_y.min(pos.y());
                max_y = max_y.max(pos.y());
            }
            let area = (max_x - min_x + 1) * (max_y - min_y + 1);
            self.filled_cells() as f32 / area as f32
        })
    }

    /// Sum over filled cells of the distance to the nearest board edge.
    #[must_use]
    pub fn distance_to_edge(&self) -> usize {
        *self.distance_to_edge.get_or_init(|| {
            let last = self.board.size() - 1;
            self.board
                .filled_positions()
                .map(|pos| {
                    let (x, y) = (pos.x(), pos.y());
                    x.min(last - x).min(y).min(last - y)
                })
                .sum()
        })
    }

    /// Rows with 1 or 2 empty cells.
    #[must_use]
    pub fn almost_completed_rows(&self) -> usize {
        *self.almost_completed_rows.get_or_init(|| {
            self.board
                .rows()
                .map(|row| row.filter(|cell| cell.is_empty()).count())
                .filter(|&empty| is_almost_completed(empty))
                .count()
        })
    }

    /// Columns with 1 or 2 empty cells.
    #[must_use]
    pub fn almost_completed_cols(&self) -> usize {
        *self.almost_completed_cols.get_or_init(|| {
            let size = self.board.size();
            (0..size)
                .map(|x| (0..size).filter(|&y| !self.board.is_filled(x, y)).count())
                .filter(|&empty| is_almost_completed(empty))
                .count()
        })
    }

    #[must_use]
    pub fn almost_completed_lines(&self) -> usize {
        self.almost_completed_rows() + self.almost_completed_cols()
    }

    /// Number of 4-connected groups of filled cells with at most
    /// [`Self::SMALL_ISLAND_MAX_SIZE`] cells.
    #[must_use]
    pub fn small_islands(&self) -> usize {
        *self.small_islands.get_or_init(|| {
            let size = self.board.size();
            let mut visited = vec![false; size * size];
            let mut queue = VecDeque::new();
            let mut count = 0;

            for start in self.board.filled_positions() {
                let (sx, sy) = (start.x(), start.y());
                if visited[sx * size + sy] {
                    continue;
                }
                visited[sx * size + sy] = true;
                queue.push_back((sx, sy));

                let mut island_size = 0;
                while let Some((x, y)) = queue.pop_front() {
                    island_size += 1;
                    for (nx, ny) in neighbors(x, y, size) {
                        if self.board.is_filled(nx, ny) && !visited[nx * size + ny] {
                            visited[nx * size + ny] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }

                if island_size <= Self::SMALL_ISLAND_MAX_SIZE {
                    count += 1;
                }
            }
            count
        })
    }
}

fn is_almost_completed(empty: usize) -> bool {
    (BoardAnalysis::ALMOST_COMPLETED_MIN_EMPTY..=BoardAnalysis::ALMOST_COMPLETED_MAX_EMPTY)
        .contains(&empty)
}

fn neighbors(x: usize, y: usize, size: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = y.checked_sub(1).map(|y| (x, y));
    let down = (y + 1 < size).then_some((x, y + 1));
    let left = x.checked_sub(1).map(|x| (x, y));
    let right = (x + 1 < size).then_some((x + 1, y));
    [up, down, left, right].into_iter().flatten()
}
