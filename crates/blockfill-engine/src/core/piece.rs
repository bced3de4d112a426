use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::UnknownPieceError;

use super::color::Color;

/// A polyomino the player has to place, with its display color.
///
/// Offsets are relative `(dx, dy)` cell positions; `dx` grows rightward and
/// `dy` downward, matching [`Position`](super::board::Position). The offset
/// order is kept as given and carries over to the placements generated from
/// the piece.
///
/// # Example
///
/// ```
/// use blockfill_engine::{Color, PieceShape};
///
/// let piece = PieceShape::from_name("T")?.to_piece(Color::PALETTE[2]);
/// assert_eq!(piece.cell_count(), 4);
/// # Ok::<(), blockfill_engine::UnknownPieceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    name: String,
    color: Color,
    offsets: Vec<(i8, i8)>,
}

impl Piece {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Color, offsets: Vec<(i8, i8)>) -> Self {
        Self {
            name: name.into(),
            color,
            offsets,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn offsets(&self) -> &[(i8, i8)] {
        &self.offsets
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Renders the piece inside its bounding box, `#` for cells and `.` for gaps.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let Some(min_x) = self.offsets.iter().map(|&(dx, _)| dx).min() else {
            return String::new();
        };
        let min_y = self.offsets.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let max_x = self.offsets.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
        let max_y = self.offsets.iter().map(|&(_, dy)| dy).max().unwrap_or(0);

        let mut out = String::new();
        for dy in min_y..=max_y {
            if dy > min_y {
                out.push('\n');
            }
            for dx in min_x..=max_x {
                out.push(if self.offsets.contains(&(dx, dy)) {
                    '#'
                } else {
                    '.'
                });
            }
        }
        out
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.color)
    }
}

/// A shape of the piece catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    name: &'static str,
    offsets: &'static [(i8, i8)],
}

impl PieceShape {
    pub const LEN: usize = 34;

    /// Every shape the game deals, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        Self::new("2x2", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
        Self::new(
            "3x3",
            &[
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
            ],
        ),
        // big corners
        Self::new("Big Top Right", &[(2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]),
        Self::new("Big Top Left", &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]),
        Self::new("Big Bottom Right", &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]),
        Self::new("Big Bottom Left", &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]),
        // small corners
        Self::new("Small Top Right", &[(1, 0), (1, 1), (0, 1)]),
        Self::new("Small Top Left", &[(0, 0), (0, 1), (1, 1)]),
        Self::new("Small Bottom Right", &[(0, 0), (1, 0), (1, 1)]),
        Self::new("Small Bottom Left", &[(0, 0), (0, 1), (1, 0)]),
        Self::new("L", &[(0, 0), (0, 1), (0, 2), (1, 0)]),
        Self::new("L90", &[(0, 0), (0, 1), (1, 1), (2, 1)]),
        Self::new("L180", &[(0, 2), (1, 2), (1, 1), (1, 0)]),
        Self::new("L270", &[(0, 0), (1, 0), (2, 0), (2, 1)]),
        Self::new("Reverse L", &[(0, 0), (1, 0), (1, 1), (1, 2)]),
        Self::new("Reverse L90", &[(0, 0), (0, 1), (1, 0), (2, 0)]),
        Self::new("Reverse L180", &[(0, 0), (0, 1), (0, 2), (1, 2)]),
        Self::new("Reverse L270", &[(0, 1), (1, 1), (2, 1), (2, 0)]),
        // vertical bars
        Self::new("Ix2", &[(0, 0), (0, 1)]),
        Self::new("Ix3", &[(0, 0), (0, 1), (0, 2)]),
        Self::new("Ix4", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
        Self::new("Ix5", &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
        // horizontal bars
        Self::new("Hx2", &[(0, 0), (1, 0)]),
        Self::new("Hx3", &[(0, 0), (1, 0), (2, 0)]),
        Self::new("Hx4", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
        Self::new("Hx5", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
        Self::new("Z", &[(0, 1), (1, 1), (1, 0), (2, 0)]),
        Self::new("ReverseZ", &[(0, 0), (1, 0), (1, 1), (2, 1)]),
        Self::new("Z90", &[(0, 0), (0, 1), (1, 1), (1, 2)]),
        Self::new("ReverseZ90", &[(1, 0), (1, 1), (0, 1), (0, 2)]),
        Self::new("T", &[(1, 0), (0, 1), (1, 1), (2, 1)]),
        Self::new("T90", &[(0, 1), (1, 0), (1, 1), (1, 2)]),
        Self::new("T180", &[(0, 0), (1, 0), (2, 0), (1, 1)]),
        Self::new("T270", &[(0, 0), (0, 1), (1, 1), (0, 2)]),
    ];

    const fn new(name: &'static str, offsets: &'static [(i8, i8)]) -> Self {
        Self { name, offsets }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn offsets(self) -> &'static [(i8, i8)] {
        self.offsets
    }

    /// Looks up a catalog shape by its exact name.
    pub fn from_name(name: &str) -> Result<Self, UnknownPieceError> {
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.name == name)
            .ok_or_else(|| UnknownPieceError {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn to_piece(self, color: Color) -> Piece {
        Piece::new(self.name, color, self.offsets.to_vec())
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Samples uniformly from [`PieceShape::ALL`].
impl Distribution<PieceShape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceShape {
        PieceShape::ALL[rng.random_range(0..PieceShape::LEN)]
    }
}

/// Samples a catalog shape in a palette color.
impl Distribution<Piece> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Piece {
        let shape: PieceShape = rng.random();
        shape.to_piece(rng.random())
    }
}

/// Writes every catalog shape as `name` followed by its ASCII art.
pub fn write_catalog<W>(out: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    for (i, shape) in PieceShape::ALL.iter().enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        let piece = shape.to_piece(Color::DEFAULT);
        writeln!(out, "{} ({} cells)", shape.name, piece.cell_count())?;
        writeln!(out, "{}", piece.to_ascii())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<_> = PieceShape::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), PieceShape::LEN);
    }

    #[test]
    fn test_catalog_offsets_are_distinct_and_normalized() {
        for shape in PieceShape::ALL {
            let offsets: HashSet<_> = shape.offsets().iter().collect();
            assert_eq!(offsets.len(), shape.offsets().len(), "{shape}");
            assert!(shape.offsets().iter().all(|&(dx, dy)| dx >= 0 && dy >= 0));
            assert!(shape.offsets().iter().any(|&(dx, _)| dx == 0), "{shape}");
            assert!(shape.offsets().iter().any(|&(_, dy)| dy == 0), "{shape}");
        }
    }

    #[test]
    fn test_from_name() {
        let shape = PieceShape::from_name("Reverse L90").unwrap();
        assert_eq!(shape.offsets(), &[(0, 0), (0, 1), (1, 0), (2, 0)]);

        let err = PieceShape::from_name("reverse l90").unwrap_err();
        assert_eq!(err.name, "reverse l90");
        assert_eq!(err.to_string(), "unknown piece shape: reverse l90");
    }

    #[test]
    fn test_to_ascii() {
        let piece = PieceShape::from_name("T").unwrap().to_piece(Color::DEFAULT);
        assert_eq!(piece.to_ascii(), ".#.\n###");

        let piece = PieceShape::from_name("Ix3").unwrap().to_piece(Color::DEFAULT);
        assert_eq!(piece.to_ascii(), "#\n#\n#");

        let empty = Piece::new("none", Color::DEFAULT, vec![]);
        assert_eq!(empty.to_ascii(), "");
    }

    #[test]
    fn test_random_piece_comes_from_catalog() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let piece: Piece = rng.random();
            let shape = PieceShape::from_name(piece.name()).unwrap();
            assert_eq!(piece.offsets(), shape.offsets());
            assert!(Color::PALETTE.contains(&piece.color()));
        }
    }

    #[test]
    fn test_write_catalog_lists_every_shape() {
        let mut out = String::new();
        write_catalog(&mut out).unwrap();
        for shape in PieceShape::ALL {
            assert!(out.contains(&format!("{} (", shape.name())));
        }
    }

    #[test]
    fn test_piece_serialization() {
        let piece = PieceShape::from_name("Hx2")
            .unwrap()
            .to_piece(Color::PALETTE[0]);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(
            serialized,
            r##"{"name":"Hx2","color":"#c86140","offsets":[[0,0],[1,0]]}"##
        );
        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }
}
