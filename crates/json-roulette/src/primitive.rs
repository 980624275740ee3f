//! Leaf value generation.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenerationError;
use crate::probability::decide;
use crate::value::GeneratedValue;
use crate::word_pool::WordPool;

/// Characters random strings are built from.
const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default length range for random strings.
pub const DEFAULT_STRING_LENGTH: RangeInclusive<usize> = 3..=9;

/// Inclusive range for random integers.
const INTEGER_RANGE: RangeInclusive<i64> = -999..=10_000;

/// Lower bound (inclusive) for random doubles.
const DOUBLE_LOW: f64 = -1000.0;

/// Upper bound (exclusive) for random doubles.
const DOUBLE_HIGH: f64 = 1000.0;

/// Range the per-call boolean bias is redrawn from.
const BOOLEAN_BIAS: RangeInclusive<f64> = 0.2..=0.8;

/// The four kinds of leaf a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Random ASCII letters.
    String,
    /// Integer in `[-999, 10000]`.
    Integer,
    /// Double in `[-1000, 1000)`.
    Double,
    /// Boolean with a randomised bias.
    Boolean,
}

impl PrimitiveKind {
    /// All kinds, in the order they are chosen from.
    pub const ALL: [Self; 4] = [Self::String, Self::Integer, Self::Double, Self::Boolean];
}

/// Produces leaf values, each of which may be replaced by `null`.
///
/// A negative nullable chance disables nulls entirely.
///
/// # Example
///
/// ```
/// use json_roulette::{GeneratedValue, PrimitiveGenerator};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let generator = PrimitiveGenerator::new(-1.0);
///
/// let value = generator.integer(&mut rng).expect("valid chance");
/// assert!(matches!(value, GeneratedValue::Integer(n) if (-999..=10_000).contains(&n)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveGenerator {
    nullable_chance: f64,
    string_length: RangeInclusive<usize>,
}

impl PrimitiveGenerator {
    /// Creates a generator with the default string length range.
    #[must_use]
    pub const fn new(nullable_chance: f64) -> Self {
        Self {
            nullable_chance,
            string_length: DEFAULT_STRING_LENGTH,
        }
    }

    /// Replaces the length range used for random strings.
    #[must_use]
    pub fn with_string_length(mut self, string_length: RangeInclusive<usize>) -> Self {
        self.string_length = string_length;
        self
    }

    /// Returns the probability of substituting `null` for a leaf.
    #[must_use]
    pub const fn nullable_chance(&self) -> f64 {
        self.nullable_chance
    }

    /// Generates a random string or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn string<R>(&self, rng: &mut R) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if decide(rng, self.nullable_chance)? {
            return Ok(GeneratedValue::Null);
        }
        let length = if self.string_length.is_empty() {
            0
        } else {
            rng.random_range(self.string_length.clone())
        };
        let text = (0..length)
            .filter_map(|_| ASCII_LETTERS.choose(rng).copied().map(char::from))
            .collect();
        Ok(GeneratedValue::String(text))
    }

    /// Generates a random integer or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn integer<R>(&self, rng: &mut R) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if decide(rng, self.nullable_chance)? {
            return Ok(GeneratedValue::Null);
        }
        Ok(GeneratedValue::Integer(rng.random_range(INTEGER_RANGE)))
    }

    /// Generates a random double or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn double<R>(&self, rng: &mut R) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if decide(rng, self.nullable_chance)? {
            return Ok(GeneratedValue::Null);
        }
        Ok(GeneratedValue::Double(rng.random_range(DOUBLE_LOW..DOUBLE_HIGH)))
    }

    /// Generates a random boolean or `null`.
    ///
    /// The probability of `true` is itself drawn from `[0.2, 0.8]` on every
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn boolean<R>(&self, rng: &mut R) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if decide(rng, self.nullable_chance)? {
            return Ok(GeneratedValue::Null);
        }
        let bias = rng.random_range(BOOLEAN_BIAS);
        Ok(GeneratedValue::Boolean(decide(rng, bias)?))
    }

    /// Generates a leaf of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn generate<R>(
        &self,
        kind: PrimitiveKind,
        rng: &mut R,
    ) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        match kind {
            PrimitiveKind::String => self.string(rng),
            PrimitiveKind::Integer => self.integer(rng),
            PrimitiveKind::Double => self.double(rng),
            PrimitiveKind::Boolean => self.boolean(rng),
        }
    }

    /// Draws a field name from `words`, then a uniformly chosen leaf.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the nullable chance exceeds one.
    pub fn make_field<R>(
        &self,
        rng: &mut R,
        words: &WordPool,
    ) -> Result<(String, GeneratedValue), GenerationError>
    where
        R: Rng + ?Sized,
    {
        let name = words.pick(rng).to_owned();
        let kind = PrimitiveKind::ALL
            .choose(rng)
            .copied()
            .unwrap_or(PrimitiveKind::String);
        let value = self.generate(kind, rng)?;
        Ok((name, value))
    }
}
