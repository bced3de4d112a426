use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// RGB color of a piece or a board cell.
///
/// Colors are carried along for display purposes only: they never influence
/// placement legality, line clearing or board signatures.
///
/// Serialized as a `"#rrggbb"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color of empty cells on a fresh board and of cells reset by a line clear.
    pub const DEFAULT: Self = Self::new(111, 178, 221);

    /// Colors pieces are drawn with.
    pub const PALETTE: [Self; 7] = [
        Self::new(200, 97, 64), // orange
        Self::new(117, 184, 81), // green
        Self::new(123, 90, 201), // purple
        Self::new(180, 59, 55), // red
        Self::new(216, 171, 74), // yellow
        Self::new(111, 178, 221), // aqua
        Self::new(81, 99, 219), // blue
    ];

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` (or `rrggbb`) hex string.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Samples uniformly from [`Color::PALETTE`].
impl Distribution<Color> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::PALETTE[rng.random_range(0..Color::PALETTE.len())]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::new(200, 97, 64).to_string(), "#c86140");
        assert_eq!(Color::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#c86140"), Some(Color::new(200, 97, 64)));
        assert_eq!(Color::from_hex("C86140"), Some(Color::new(200, 97, 64)));
        assert_eq!(Color::from_hex("#c8614"), None);
        assert_eq!(Color::from_hex("#zz6140"), None);
    }

    #[test]
    fn test_random_color_is_from_palette() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let color: Color = rng.random();
            assert!(Color::PALETTE.contains(&color));
        }
    }

    #[test]
    fn test_serialization() {
        let serialized = serde_json::to_string(&Color::new(81, 99, 219)).unwrap();
        assert_eq!(serialized, "\"#5163db\"");

        let deserialized: Color = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Color::new(81, 99, 219));

        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
