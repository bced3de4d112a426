use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::piece::Piece;

/// Number of pieces dealt per hand.
pub const HAND_SIZE: usize = 3;

/// Deals random pieces: a uniformly chosen catalog shape in a uniformly
/// chosen palette color.
///
/// # Example
///
/// ```
/// use blockfill_engine::{PieceGenerator, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.draw_hand(), b.draw_hand());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic for a given seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    pub fn draw_piece(&mut self) -> Piece {
        self.rng.random()
    }

    pub fn draw_hand(&mut self) -> [Piece; HAND_SIZE] {
        [self.draw_piece(), self.draw_piece(), self.draw_piece()]
    }
}

/// 128-bit seed for deterministic piece generation.
///
/// Written as a 32-character hex string, both by [`fmt::Display`] and by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParsePieceSeedError {
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceShape};

    #[test]
    fn test_same_seed_same_pieces() {
        let seed = PieceSeed::from_bytes([7; 16]);
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(a.draw_piece(), b.draw_piece());
        }
    }

    #[test]
    fn test_drawn_pieces_come_from_catalog() {
        let mut generator = PieceGenerator::new();
        for piece in (0..30).flat_map(|_| generator.draw_hand()) {
            let shape = PieceShape::from_name(piece.name()).unwrap();
            assert_eq!(piece.offsets(), shape.offsets());
            assert!(Color::PALETTE.contains(&piece.color()));
        }
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_errors() {
            assert!("0123456789abcdef".parse::<PieceSeed>().is_err());
            assert!("+123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());

            let result: Result<PieceSeed, _> =
                serde_json::from_str("\"ghijklmnopqrstuvwxyzghijklmnopqr\"");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid seed"));
        }
    }
}
