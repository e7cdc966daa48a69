use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseSeedError, PieceKind};

/// Supplies the kind of every piece a session spawns.
///
/// The session owns its source, so tests can inject a fixed sequence with
/// [`SequencePieces`] while normal play uses [`RandomPieces`].
pub trait PieceSource {
    /// Draws the next piece kind.
    fn next_kind(&mut self) -> PieceKind;
}

impl<S> PieceSource for &mut S
where
    S: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

impl<S> PieceSource for Box<S>
where
    S: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random piece draw over the seven kinds.
///
/// Every draw is independent (no bag), so the same kind may repeat.
///
/// # Example
///
/// ```
/// use tetris_engine::{PieceSeed, PieceSource as _, RandomPieces};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = RandomPieces::with_seed(seed);
/// let mut b = RandomPieces::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomPieces {
    rng: Pcg32,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Creates a source seeded from the thread-local generator.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Repeats a fixed list of piece kinds in order.
///
/// ```
/// use tetris_engine::{PieceKind, PieceSource as _, SequencePieces};
///
/// let mut source = SequencePieces::new([PieceKind::I, PieceKind::O]);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::O);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl SequencePieces {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let kinds = kinds.into_iter().collect::<Vec<_>>();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, cursor: 0 }
    }

    /// Always draws `kind`.
    #[must_use]
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequencePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the [`RandomPieces`] generator. The
/// same seed produces the same sequence of pieces, which makes headless runs
/// reproducible. Serialized and parsed as a 32-character hex string.
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

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|source| ParseSeedError::InvalidDigits { source })?;
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

/// Allows generating random `PieceSeed` values with `rng.random()`.
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

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequencePieces::new([PieceKind::T, PieceKind::S, PieceKind::Z]);
        let drawn = (0..7).map(|_| source.next_kind()).collect::<Vec<_>>();
        assert_eq!(
            drawn,
            [
                PieceKind::T,
                PieceKind::S,
                PieceKind::Z,
                PieceKind::T,
                PieceKind::S,
                PieceKind::Z,
                PieceKind::T
            ]
        );
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_sequence_rejects_empty() {
        let _ = SequencePieces::new(Vec::new());
    }

    #[test]
    fn test_source_through_mut_ref_and_box() {
        fn draw(mut source: impl PieceSource) -> PieceKind {
            source.next_kind()
        }

        let mut inner = SequencePieces::new([PieceKind::L, PieceKind::O]);
        assert_eq!(draw(&mut inner), PieceKind::L);
        assert_eq!(draw(&mut inner), PieceKind::O);

        let mut boxed: Box<dyn PieceSource> = Box::new(SequencePieces::repeat(PieceKind::J));
        assert_eq!(boxed.next_kind(), PieceKind::J);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes(SEQUENTIAL);
        let mut source1 = RandomPieces::with_seed(seed);
        let mut source2 = RandomPieces::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(source1.next_kind(), source2.next_kind());
        }
    }

    #[test]
    fn test_random_source_draws_every_kind() {
        let mut source = RandomPieces::with_seed(PieceSeed::from_bytes([7; 16]));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[source.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_seed_known_values() {
        let seed = PieceSeed::from_bytes(SEQUENTIAL);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
        assert_eq!(
            PieceSeed::from_bytes([0; 16]).to_string(),
            "00000000000000000000000000000000"
        );
    }

    #[test]
    fn test_seed_accepts_uppercase_hex() {
        let seed: PieceSeed = serde_json::from_str("\"0123456789ABCDEFFEDCBA9876543210\"").unwrap();
        assert_eq!(seed, PieceSeed::from_bytes(SEQUENTIAL));
    }

    #[test]
    fn test_seed_roundtrip_random() {
        let seed: PieceSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_seed_errors() {
        assert_eq!(
            "0123".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidLength { len: 4 })
        );
        assert!(matches!(
            "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidDigits { .. })
        ));

        let err = serde_json::from_str::<PieceSeed>("\"\"").unwrap_err();
        assert!(err.to_string().contains("32 hex digits"));
    }
}
