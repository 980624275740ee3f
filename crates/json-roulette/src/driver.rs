//! Top-level generation loop.
//!
//! [`DocumentDriver`] owns the random source, the sampled word pool, and the
//! composite generator for one run. Documents are produced strictly in
//! order from a single random stream, so a pinned seed reproduces the whole
//! output byte for byte.

use std::io::Write;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::composite::{CompositeGenerator, GenerationContext};
use crate::config::{GenerationConfig, Seed};
use crate::error::{GenerationError, RunError, WordSourceError};
use crate::primitive::PrimitiveGenerator;
use crate::serializer::render;
use crate::value::GeneratedValue;
use crate::word_pool::WordPool;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of documents written.
    pub documents: usize,
}

/// Drives document generation for one validated configuration.
///
/// # Example
///
/// ```
/// use json_roulette::{
///     CompositeKind, CompositeShape, DocumentDriver, GenerationConfig, Seed,
/// };
///
/// let shape = CompositeShape::new(2, 2, -1.0, 1).expect("shape");
/// let config = GenerationConfig::new(2, CompositeKind::Array, shape, -1.0)
///     .expect("config")
///     .with_seed(Seed::Number(42));
/// let source = vec!["owl".to_owned(), "fern".to_owned()];
///
/// let mut driver = DocumentDriver::new(config, &source).expect("driver");
/// let mut out = Vec::new();
/// let summary = driver.run(&mut out).expect("run");
///
/// assert_eq!(summary.documents, 2);
/// assert_eq!(String::from_utf8(out).expect("utf8").lines().count(), 2);
/// ```
#[derive(Debug)]
pub struct DocumentDriver<R = ChaCha8Rng> {
    config: GenerationConfig,
    generator: CompositeGenerator,
    words: WordPool,
    rng: R,
}

impl DocumentDriver<ChaCha8Rng> {
    /// Seeds the random source and samples the word pool from `source`.
    ///
    /// Without a configured seed a fresh one is drawn and logged so the run
    /// can be replayed.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError::EmptySource`] if `source` has no words.
    pub fn new(config: GenerationConfig, source: &[String]) -> Result<Self, WordSourceError> {
        let seed = config.seed().cloned().unwrap_or_else(|| {
            let fresh = Seed::random();
            info!(seed = ?fresh, "no seed supplied; drew a fresh one");
            fresh
        });
        let mut rng = seed.rng();
        let words = WordPool::sample(&mut rng, source, config.word_sample_size())?;
        debug!(pool = words.len(), "sampled word pool");
        Ok(Self::from_parts(config, words, rng))
    }
}

impl<R> DocumentDriver<R>
where
    R: Rng,
{
    /// Assembles a driver from an existing pool and random source.
    #[must_use]
    pub const fn from_parts(config: GenerationConfig, words: WordPool, rng: R) -> Self {
        let primitives = PrimitiveGenerator::new(config.nullable_chance());
        let generator = CompositeGenerator::new(*config.shape(), primitives);
        Self {
            config,
            generator,
            words,
            rng,
        }
    }

    /// Returns the run's configuration.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Returns the sampled word pool.
    #[must_use]
    pub const fn words(&self) -> &WordPool {
        &self.words
    }

    /// Builds the next top-level document.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if a probability exceeds one.
    pub fn next_document(&mut self) -> Result<GeneratedValue, GenerationError> {
        let mut context = GenerationContext::new(&mut self.rng, &self.words);
        self.generator
            .build_document(&mut context, self.config.output_kind())
    }

    /// Returns a lazy iterator over the configured number of documents.
    #[must_use]
    pub const fn documents(&mut self) -> Documents<'_, R> {
        let remaining = self.config.output_count();
        Documents {
            driver: self,
            remaining,
        }
    }

    /// Writes every document to `out`, one per line, in generation order.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] if generation, rendering, or writing fails.
    /// Documents already written stay written.
    pub fn run<W>(&mut self, mut out: W) -> Result<RunSummary, RunError>
    where
        W: Write,
    {
        let count = self.config.output_count();
        let style = self.config.style();
        info!(
            count,
            kind = ?self.config.output_kind(),
            ?style,
            "generating documents"
        );

        for index in 0..count {
            let document = self.next_document()?;
            let text = render(&document, style).map_err(|err| RunError::Render {
                index,
                message: err.to_string(),
            })?;
            writeln!(out, "{text}").map_err(|err| RunError::Write {
                message: err.to_string(),
            })?;
            debug!(index, depth = document.composite_depth(), "wrote document");
        }
        out.flush().map_err(|err| RunError::Write {
            message: err.to_string(),
        })?;

        info!(documents = count, "generation finished");
        Ok(RunSummary { documents: count })
    }
}

/// Iterator returned by [`DocumentDriver::documents`].
#[derive(Debug)]
pub struct Documents<'a, R> {
    driver: &'a mut DocumentDriver<R>,
    remaining: usize,
}

impl<R> Iterator for Documents<'_, R>
where
    R: Rng,
{
    type Item = Result<GeneratedValue, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.driver.next_document())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Documents<'_, R> where R: Rng {}
