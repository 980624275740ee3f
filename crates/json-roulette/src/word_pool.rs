//! Field-name vocabulary.
//!
//! The pool is sampled once from the full word list before generation
//! starts and never changes afterwards.

use std::num::NonZeroUsize;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::WordSourceError;

/// A fixed, sorted sample of candidate field names.
///
/// Words are drawn with replacement, so the same word may appear more than
/// once; repeated entries simply make that name more likely to be picked.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use json_roulette::WordPool;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let source = vec!["owl".to_owned(), "moss".to_owned(), "fern".to_owned()];
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let size = NonZeroUsize::new(5).expect("non-zero");
///
/// let pool = WordPool::sample(&mut rng, &source, size).expect("non-empty source");
/// assert_eq!(pool.len(), 5);
/// assert!(source.iter().any(|word| word == pool.pick(&mut rng)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Draws `sample_size` words from `source` with replacement and sorts
    /// them lexicographically.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError::EmptySource`] if `source` has no words.
    pub fn sample<R>(
        rng: &mut R,
        source: &[String],
        sample_size: NonZeroUsize,
    ) -> Result<Self, WordSourceError>
    where
        R: Rng + ?Sized,
    {
        if source.is_empty() {
            return Err(WordSourceError::EmptySource);
        }

        let mut words: Vec<String> = (0..sample_size.get())
            .filter_map(|_| source.choose(rng).cloned())
            .collect();
        words.sort_unstable();

        Ok(Self { words })
    }

    /// Returns a uniformly chosen word from the pool.
    #[must_use]
    pub fn pick<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        // The pool is never empty once built.
        self.words.choose(rng).map_or("", String::as_str)
    }

    /// Returns the sampled words in sorted order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the number of sampled words, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the pool holds no words.
    ///
    /// A successfully sampled pool is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
