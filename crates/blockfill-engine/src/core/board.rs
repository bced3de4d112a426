use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::BoardParseError;

use super::color::Color;

/// Coordinates of a cell on the board.
///
/// - `x` is the column, increasing rightward
/// - `y` is the row, increasing downward (`y = 0` is the top row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(self) -> usize {
        usize::from(self.x)
    }

    #[must_use]
    pub fn y(self) -> usize {
        usize::from(self.y)
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` if either
    /// coordinate would leave the `u8` range.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self { x, y })
    }
}

/// A single cell of the board.
///
/// The color of an empty cell is meaningless; it is kept so that the board
/// can be rendered without consulting the piece history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    filled: bool,
    color: Color,
}

impl Cell {
    pub const EMPTY: Self = Self {
        filled: false,
        color: Color::DEFAULT,
    };

    #[must_use]
    pub const fn filled(color: Color) -> Self {
        Self {
            filled: true,
            color,
        }
    }

    #[must_use]
    pub const fn is_filled(self) -> bool {
        self.filled
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.filled
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }
}

/// Fill-pattern key of a board.
///
/// One bit per cell in the board's traversal order (column by column, top to
/// bottom), plus the board size. Cell colors are not part of the signature:
/// two boards with the same fill pattern share a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSignature {
    size: u8,
    bits: [u64; 4],
}

impl BoardSignature {
    fn is_set(&self, i: usize) -> bool {
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }
}

impl fmt::Display for BoardSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = usize::from(self.size) * usize::from(self.size);
        for i in 0..len {
            f.write_char(if self.is_set(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Square grid of cells the pieces are placed on.
///
/// Cells are stored column by column (`index = x * size + y`), which is also
/// the order used by [`Board::signature`].
///
/// # Example
///
/// ```
/// use blockfill_engine::{Board, Color, Position};
///
/// let mut board = Board::new(4);
/// board.place(
///     &[
///         Position::new(0, 0),
///         Position::new(1, 0),
///         Position::new(2, 0),
///         Position::new(3, 0),
///     ],
///     Some(Color::PALETTE[0]),
/// );
/// assert_eq!(board.clear_full_lines(), 1);
/// assert_eq!(board.count_filled(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Largest supported board size.
    pub const MAX_SIZE: usize = 16;
    /// Board size used by the game.
    pub const DEFAULT_SIZE: usize = 8;

    /// Creates an empty `size × size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`Board::MAX_SIZE`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=Self::MAX_SIZE).contains(&size),
            "board size must be between 1 and {}, got {size}",
            Self::MAX_SIZE
        );
        Self {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then_some(x * self.size + y)
    }

    fn column(&self, x: usize) -> &[Cell] {
        &self.cells[x * self.size..][..self.size]
    }

    /// Returns the cell at `(x, y)`, or `None` if out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns `true` if `(x, y)` is in range and filled.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::is_filled)
    }

    /// Returns `true` if `(x, y)` is in range and empty.
    #[must_use]
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::is_empty)
    }

    /// Iterates over all cells in traversal order (column by column).
    #[expect(clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        // size <= MAX_SIZE, so both coordinates fit in u8
        self.cells.iter().enumerate().map(|(i, cell)| {
            let pos = Position::new((i / self.size) as u8, (i % self.size) as u8);
            (pos, *cell)
        })
    }

    /// Iterates over the rows from top to bottom, each row left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        (0..self.size).map(move |y| (0..self.size).map(move |x| self.cells[x * self.size + y]))
    }

    /// Iterates over the positions of filled cells in traversal order.
    pub fn filled_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_filled())
            .map(|(pos, _)| pos)
    }

    #[must_use]
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Marks every given position as filled, overwriting its color if `color` is given.
    ///
    /// Positions outside the board are skipped.
    pub fn place(&mut self, positions: &[Position], color: Option<Color>) {
        for pos in positions {
            let Some(i) = self.index(pos.x(), pos.y()) else {
                continue;
            };
            let cell = &mut self.cells[i];
            cell.filled = true;
            if let Some(color) = color {
                cell.color = color;
            }
        }
    }

    /// Clears every completely filled row and column and returns how many were cleared.
    ///
    /// Full rows and columns are detected before anything is cleared, so a cell
    /// at the intersection of a full row and a full column counts toward both
    /// lines but is only reset once.
    pub fn clear_full_lines(&mut self) -> usize {
        let size = self.size;
        let mut full_rows = 0u16;
        let mut full_cols = 0u16;

        for x in 0..size {
            if self.column(x).iter().all(|cell| cell.is_filled()) {
                full_cols |= 1 << x;
            }
        }
        for y in 0..size {
            if (0..size).all(|x| self.cells[x * size + y].is_filled()) {
                full_rows |= 1 << y;
            }
        }

        if full_rows == 0 && full_cols == 0 {
            return 0;
        }

        for x in 0..size {
            for y in 0..size {
                if full_cols & (1 << x) != 0 || full_rows & (1 << y) != 0 {
                    self.cells[x * size + y] = Cell::EMPTY;
                }
            }
        }

        (full_rows.count_ones() + full_cols.count_ones()) as usize
    }

    /// Returns the fill-pattern signature of this board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn signature(&self) -> BoardSignature {
        let mut bits = [0u64; 4];
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.is_filled() {
                bits[i / 64] |= 1 << (i % 64);
            }
        }
        BoardSignature {
            size: self.size as u8,
            bits,
        }
    }

    /// Creates a board from ASCII art.
    ///
    /// `#` is a filled cell, `.` an empty one. Rows are given top to bottom,
    /// one per line; blank lines and surrounding whitespace are ignored. The
    /// number of rows determines the board size.
    pub fn from_ascii(art: &str) -> Result<Self, BoardParseError> {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    /// Like [`Board::from_ascii`], but with the rows already split.
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, BoardParseError>
    where
        S: AsRef<str>,
    {
        let size = rows.len();
        if !(1..=Self::MAX_SIZE).contains(&size) {
            return Err(BoardParseError::InvalidSize {
                rows: size,
                max: Self::MAX_SIZE,
            });
        }

        let mut board = Self::new(size);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != size {
                return Err(BoardParseError::RowLength {
                    y,
                    expected: size,
                    actual: len,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => board.cells[x * size + y] = Cell::filled(Color::DEFAULT),
                    '.' => {}
                    _ => return Err(BoardParseError::InvalidCell { x, y, ch }),
                }
            }
        }
        Ok(board)
    }

    fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.map(|cell| if cell.is_filled() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.to_rows().iter().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["#..#", "....", ...] (one string per row, top to bottom)
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
