use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Draws the piece sequence for a session.
///
/// Kinds are sampled independently and uniformly, one draw per spawn; there
/// is no bag fairness, so droughts of a kind can happen. The generator is a
/// seeded [`Pcg32`], so a session can be replayed exactly from its
/// [`PieceSeed`].
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

    /// Like [`Self::new`], but with a specific seed for a deterministic
    /// sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece kind.
    pub fn pop_next(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) value, written as 32 hex characters in serialized
/// form and on the command line. Sessions built from the same seed draw the
/// same piece sequence, which enables reproducible runs and deterministic
/// tests.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut first = GameSession::with_seed(seed);
/// let mut second = GameSession::with_seed(seed);
/// first.start();
/// second.start();
///
/// assert_eq!(
///     first.current_piece().map(|piece| piece.kind()),
///     second.current_piece().map(|piece| piece.kind()),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PieceSeed([u8; 16]);

/// Error parsing a [`PieceSeed`] from its 32-character hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    /// The input is not exactly 32 characters long.
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    Length {
        /// Number of characters in the rejected input.
        len: usize,
    },
    /// The input contains characters outside `0-9a-fA-F`.
    #[display("invalid seed: not a 128-bit hex value")]
    NotHex,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::NotHex)?;
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
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
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

    mod seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed.0, deserialized.0);
        }

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let hex = serialized.trim_matches('"');

            assert_eq!(hex.len(), 32);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = PieceSeed([0u8; 16]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"00000000000000000000000000000000\"");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized.0, [0u8; 16]);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: the first byte appears first in the hex string.
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76,
                0x54, 0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let deserialized: PieceSeed =
                serde_json::from_str("\"0123456789ABCDEFFEDCBA9876543210\"").unwrap();
            assert_eq!(
                deserialized.0,
                [
                    0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76,
                    0x54, 0x32, 0x10,
                ]
            );
        }

        #[test]
        fn test_deserialize_errors() {
            for json in [
                "\"0123456789abcdef0123456789abcde\"",   // 31 chars
                "\"0123456789abcdef0123456789abcdef0\"", // 33 chars
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",  // 32 chars, not hex
                "\"\"",
            ] {
                let result: Result<PieceSeed, _> = serde_json::from_str(json);
                let message = result.unwrap_err().to_string();
                assert!(message.contains("invalid seed"), "{json}: {message}");
            }
        }
    }

    mod seed_parsing {
        use super::*;

        #[test]
        fn test_display_and_parse_roundtrip() {
            let seed: PieceSeed = rand::rng().random();
            let reparsed: PieceSeed = seed.to_string().parse().unwrap();
            assert_eq!(seed.0, reparsed.0);
        }

        #[test]
        fn test_parse_rejects_wrong_length() {
            assert_eq!(
                "abc".parse::<PieceSeed>().unwrap_err(),
                ParsePieceSeedError::Length { len: 3 }
            );
        }

        #[test]
        fn test_parse_rejects_non_hex() {
            assert_eq!(
                "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"
                    .parse::<PieceSeed>()
                    .unwrap_err(),
                ParsePieceSeedError::NotHex
            );
        }
    }

    mod generation {
        use super::*;

        #[test]
        fn test_same_seed_draws_the_same_sequence() {
            let seed: PieceSeed = rand::rng().random();
            let mut first = PieceGenerator::with_seed(seed);
            let mut second = PieceGenerator::with_seed(seed);

            for _ in 0..20 {
                assert_eq!(first.pop_next(), second.pop_next());
            }
        }

        #[test]
        fn test_every_kind_eventually_appears() {
            // The chance a kind is missing from 200 uniform draws is (6/7)^200.
            let mut generator = PieceGenerator::with_seed(PieceSeed([7u8; 16]));
            let mut seen = [false; PieceKind::LEN];
            for _ in 0..200 {
                seen[generator.pop_next() as usize - 1] = true;
            }
            assert_eq!(seen, [true; PieceKind::LEN]);
        }
    }
}
