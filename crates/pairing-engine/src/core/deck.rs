use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of words presented together before the exercise advances.
pub const DEFAULT_SECTION_SIZE: usize = 5;

/// Seed for deterministic deck shuffling.
///
/// 128-bit seed for the shuffler's generator. The same seed reproduces the same
/// deck order, meaning-column order and retry decoy choice, which makes a whole
/// exercise replayable from its seed and the sequence of actions.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use pairing_engine::{DeckSeed, DeckShuffler};
/// use rand::Rng as _;
///
/// let seed: DeckSeed = rand::rng().random();
/// let mut a = DeckShuffler::with_seed(seed);
/// let mut b = DeckShuffler::with_seed(seed);
///
/// let order: Vec<u32> = (0..10).collect();
/// assert_eq!(a.shuffle(order.clone()), b.shuffle(order));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeckSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DeckSeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {input}")]
    InvalidDigits { input: String },
}

impl DeckSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for DeckSeed {
    type Err = DeckSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(DeckSeedParseError::InvalidLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| DeckSeedParseError::InvalidDigits {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DeckSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeckSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<DeckSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DeckSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DeckSeed(seed)
    }
}

/// Source of every random decision the engine makes.
///
/// Wraps a seeded PCG generator. Shuffling is a uniform Fisher-Yates permutation.
#[derive(Debug, Clone)]
pub struct DeckShuffler {
    rng: Pcg32,
}

impl Default for DeckShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckShuffler {
    /// Creates a shuffler seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: DeckSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns `items` in a uniformly random order.
    pub fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        items.shuffle(&mut self.rng);
        items
    }

    /// Picks one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

/// Splits `items` into contiguous sections of `size` (clamped to at least 1).
///
/// The last section may be shorter. Order is preserved, so the result is fully
/// determined by the already-shuffled input.
#[must_use]
pub fn partition_into_sections<T>(items: &[T], size: usize) -> Vec<Vec<T>>
where
    T: Clone,
{
    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}
