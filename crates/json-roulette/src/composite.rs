//! Recursive object and array generation.
//!
//! Every composite node draws its slot count from the configured bounds and
//! fills each slot with a leaf field. While the node sits above the depth
//! cap, each slot may instead be upgraded to a nested composite of a
//! randomly chosen kind. Recursion only happens while
//! `current_depth < max_depth` and always increments the depth, so a tree
//! never nests deeper than the cap whatever the nesting chance.
//!
//! Nested slots keep the field name drawn for the leaf they replace; no
//! extra word is drawn for them.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::trace;

use crate::error::{ConfigError, GenerationError};
use crate::primitive::PrimitiveGenerator;
use crate::probability::decide;
use crate::value::{GeneratedValue, ObjectNode};
use crate::word_pool::WordPool;

/// Depth of a top-level document.
pub const ROOT_DEPTH: usize = 1;

/// Deepest accepted depth cap.
///
/// Generation recurses once per level, so the cap also bounds stack use.
pub const MAX_NESTED_DEPTH: usize = 1000;

/// Nullable chance passed to top-level documents, which are never null.
pub const ROOT_NULLABLE_CHANCE: f64 = -1.0;

/// Which kind of composite node to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// A JSON object keyed by pool words.
    Object,
    /// A JSON array.
    Array,
}

impl CompositeKind {
    /// Both kinds, in the order nested slots choose from.
    pub const ALL: [Self; 2] = [Self::Object, Self::Array];
}

/// Size and nesting bounds shared by every composite node of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeShape {
    size_low: usize,
    size_high: usize,
    nested_chance: f64,
    max_depth: usize,
}

impl CompositeShape {
    /// Validates and builds a shape.
    ///
    /// A negative `nested_chance` disables nesting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the size bounds are empty or start at
    /// zero, the depth cap is zero or above [`MAX_NESTED_DEPTH`], or
    /// `nested_chance` exceeds one.
    ///
    /// # Example
    ///
    /// ```
    /// use json_roulette::CompositeShape;
    ///
    /// let shape = CompositeShape::new(1, 3, 0.2, 4).expect("valid shape");
    /// assert_eq!(shape.size_high(), 3);
    /// assert!(CompositeShape::new(3, 1, 0.2, 4).is_err());
    /// ```
    pub fn new(
        size_low: usize,
        size_high: usize,
        nested_chance: f64,
        max_depth: usize,
    ) -> Result<Self, ConfigError> {
        if size_low == 0 || size_low > size_high {
            return Err(ConfigError::InvalidSizeBounds {
                low: size_low,
                high: size_high,
            });
        }
        if max_depth == 0 || max_depth > MAX_NESTED_DEPTH {
            return Err(ConfigError::InvalidDepth { value: max_depth });
        }
        if nested_chance.is_nan() || nested_chance > 1.0 {
            return Err(ConfigError::InvalidProbability {
                flag: "--nested-chance",
                expected: "at most 1",
                value: nested_chance,
            });
        }
        Ok(Self {
            size_low,
            size_high,
            nested_chance,
            max_depth,
        })
    }

    /// Returns the minimum number of children per composite.
    #[must_use]
    pub const fn size_low(&self) -> usize {
        self.size_low
    }

    /// Returns the maximum number of children per composite.
    #[must_use]
    pub const fn size_high(&self) -> usize {
        self.size_high
    }

    /// Returns the per-slot probability of nesting.
    #[must_use]
    pub const fn nested_chance(&self) -> f64 {
        self.nested_chance
    }

    /// Returns the deepest composite level a document may reach.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Random source and vocabulary threaded through one generation pass.
#[derive(Debug)]
pub struct GenerationContext<'a, R: ?Sized> {
    rng: &'a mut R,
    words: &'a WordPool,
}

impl<'a, R> GenerationContext<'a, R>
where
    R: Rng + ?Sized,
{
    /// Bundles a random source with the word pool.
    pub const fn new(rng: &'a mut R, words: &'a WordPool) -> Self {
        Self { rng, words }
    }
}

/// Builds composite nodes.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use json_roulette::{
///     CompositeGenerator, CompositeKind, CompositeShape, GenerationContext, PrimitiveGenerator,
///     WordPool,
/// };
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let source = vec!["owl".to_owned(), "fern".to_owned()];
/// let words = WordPool::sample(&mut rng, &source, NonZeroUsize::MIN).expect("pool");
/// let shape = CompositeShape::new(2, 2, -1.0, 1).expect("shape");
/// let generator = CompositeGenerator::new(shape, PrimitiveGenerator::new(-1.0));
///
/// let mut context = GenerationContext::new(&mut rng, &words);
/// let document = generator
///     .build_document(&mut context, CompositeKind::Array)
///     .expect("document");
/// assert_eq!(document.child_count(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeGenerator {
    shape: CompositeShape,
    primitives: PrimitiveGenerator,
}

impl CompositeGenerator {
    /// Creates a generator for the given shape and leaf settings.
    ///
    /// Nested composites use the leaf generator's nullable chance for their
    /// own nullability.
    #[must_use]
    pub const fn new(shape: CompositeShape, primitives: PrimitiveGenerator) -> Self {
        Self { shape, primitives }
    }

    /// Returns the configured shape.
    #[must_use]
    pub const fn shape(&self) -> &CompositeShape {
        &self.shape
    }

    /// Builds a top-level document, which is never null.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if a probability exceeds one.
    pub fn build_document<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        kind: CompositeKind,
    ) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        self.build(context, kind, ROOT_DEPTH, ROOT_NULLABLE_CHANCE)
    }

    /// Builds a composite of the given kind at `current_depth`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if a probability exceeds one.
    pub fn build<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        kind: CompositeKind,
        current_depth: usize,
        nullable_chance: f64,
    ) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        match kind {
            CompositeKind::Object => self.build_object(context, current_depth, nullable_chance),
            CompositeKind::Array => self.build_array(context, current_depth, nullable_chance),
        }
    }

    /// Builds an object node, or `null` with probability `nullable_chance`.
    ///
    /// Duplicate field names overwrite earlier slots, so an object can end
    /// up with fewer keys than slots drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if a probability exceeds one.
    pub fn build_object<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        current_depth: usize,
        nullable_chance: f64,
    ) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let Some(slot_count) = self.open_node(context, nullable_chance)? else {
            return Ok(GeneratedValue::Null);
        };

        let mut object = ObjectNode::with_capacity(slot_count);
        for _ in 0..slot_count {
            let (name, value) = self.fill_slot(context, current_depth)?;
            object.insert(name, value);
        }
        Ok(GeneratedValue::Object(object))
    }

    /// Builds an array node, or `null` with probability `nullable_chance`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if a probability exceeds one.
    pub fn build_array<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        current_depth: usize,
        nullable_chance: f64,
    ) -> Result<GeneratedValue, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let Some(slot_count) = self.open_node(context, nullable_chance)? else {
            return Ok(GeneratedValue::Null);
        };

        let mut items = Vec::with_capacity(slot_count);
        for _ in 0..slot_count {
            let (_, value) = self.fill_slot(context, current_depth)?;
            items.push(value);
        }
        Ok(GeneratedValue::Array(items))
    }

    /// Rolls the node's nullability, then its slot count.
    fn open_node<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        nullable_chance: f64,
    ) -> Result<Option<usize>, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if nullable_chance >= 0.0 && decide(context.rng, nullable_chance)? {
            return Ok(None);
        }
        Ok(Some(
            context
                .rng
                .random_range(self.shape.size_low..=self.shape.size_high),
        ))
    }

    fn fill_slot<R>(
        &self,
        context: &mut GenerationContext<'_, R>,
        current_depth: usize,
    ) -> Result<(String, GeneratedValue), GenerationError>
    where
        R: Rng + ?Sized,
    {
        let (name, leaf) = self.primitives.make_field(context.rng, context.words)?;
        if current_depth < self.shape.max_depth && decide(context.rng, self.shape.nested_chance)? {
            let kind = CompositeKind::ALL
                .choose(context.rng)
                .copied()
                .unwrap_or(CompositeKind::Object);
            trace!(depth = current_depth + 1, ?kind, "nesting composite");
            let nested = self.build(
                context,
                kind,
                current_depth + 1,
                self.primitives.nullable_chance(),
            )?;
            return Ok((name, nested));
        }
        Ok((name, leaf))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn words() -> WordPool {
        let source: Vec<String> = [
            "alder", "beech", "cedar", "damson", "elder", "fir", "gorse", "hazel", "ivy", "juniper",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        WordPool::sample(&mut rng, &source, NonZeroUsize::new(50).expect("non-zero"))
            .expect("pool")
    }

    fn generator(
        low: usize,
        high: usize,
        nested_chance: f64,
        max_depth: usize,
        nullable_chance: f64,
    ) -> CompositeGenerator {
        let shape = CompositeShape::new(low, high, nested_chance, max_depth).expect("shape");
        CompositeGenerator::new(shape, PrimitiveGenerator::new(nullable_chance))
    }

    fn documents(
        generator: &CompositeGenerator,
        words: &WordPool,
        kind: CompositeKind,
        seed: u64,
        count: usize,
    ) -> Vec<GeneratedValue> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut context = GenerationContext::new(&mut rng, words);
        (0..count)
            .map(|_| {
                generator
                    .build_document(&mut context, kind)
                    .expect("document")
            })
            .collect()
    }

    /// Asserts that every composite in `tree` has between `low` and `high`
    /// children, allowing objects to shrink when names collide.
    fn assert_slot_counts(tree: &GeneratedValue, low: usize, high: usize) {
        tree.walk(&mut |node| match node {
            GeneratedValue::Array(items) => {
                assert!((low..=high).contains(&items.len()), "array of {}", items.len());
            }
            GeneratedValue::Object(object) => {
                assert!((1..=high).contains(&object.len()), "object of {}", object.len());
            }
            _ => {}
        });
    }

    #[rstest]
    #[case(CompositeKind::Object)]
    #[case(CompositeKind::Array)]
    fn depth_never_exceeds_cap(words: WordPool, #[case] kind: CompositeKind) {
        let generator = generator(1, 4, 0.9, 3, 0.05);

        for document in documents(&generator, &words, kind, 7, 50) {
            assert!(document.composite_depth() <= 3, "{document:?}");
        }
    }

    #[rstest]
    fn certain_nesting_reaches_cap(words: WordPool) {
        let generator = generator(1, 2, 1.0, 4, -1.0);

        for document in documents(&generator, &words, CompositeKind::Array, 3, 10) {
            assert_eq!(document.composite_depth(), 4);
        }
    }

    #[rstest]
    fn array_slot_counts_stay_in_bounds(words: WordPool) {
        let generator = generator(2, 5, 0.3, 4, 0.05);

        for document in documents(&generator, &words, CompositeKind::Array, 11, 50) {
            assert_slot_counts(&document, 2, 5);
        }
    }

    #[rstest]
    fn object_slot_counts_stay_in_bounds(words: WordPool) {
        let generator = generator(2, 5, 0.3, 4, 0.05);

        for document in documents(&generator, &words, CompositeKind::Object, 13, 50) {
            assert_slot_counts(&document, 2, 5);
        }
    }

    #[rstest]
    #[case(CompositeKind::Object)]
    #[case(CompositeKind::Array)]
    fn root_is_never_null(words: WordPool, #[case] kind: CompositeKind) {
        let generator = generator(1, 3, 0.5, 3, 1.0);

        for document in documents(&generator, &words, kind, 17, 50) {
            assert!(document.is_composite());
        }
    }

    #[rstest]
    fn certain_nullability_nulls_every_child(words: WordPool) {
        let generator = generator(1, 3, 0.5, 3, 1.0);

        for document in documents(&generator, &words, CompositeKind::Array, 19, 20) {
            let GeneratedValue::Array(items) = document else {
                panic!("expected array root");
            };
            assert!(items.iter().all(GeneratedValue::is_null));
        }
    }

    #[rstest]
    fn negative_nullability_produces_no_nulls(words: WordPool) {
        let generator = generator(1, 4, 0.5, 4, -1.0);

        for document in documents(&generator, &words, CompositeKind::Object, 23, 50) {
            document.walk(&mut |node| assert!(!node.is_null()));
        }
    }

    #[rstest]
    #[case(CompositeKind::Object)]
    #[case(CompositeKind::Array)]
    fn disabled_nesting_produces_flat_documents(words: WordPool, #[case] kind: CompositeKind) {
        let generator = generator(1, 6, -1.0, 10, 0.05);

        for document in documents(&generator, &words, kind, 29, 50) {
            assert_eq!(document.composite_depth(), 1);
        }
    }

    #[rstest]
    fn depth_cap_of_one_blocks_nesting(words: WordPool) {
        let generator = generator(1, 3, 1.0, 1, 0.05);

        for document in documents(&generator, &words, CompositeKind::Array, 31, 50) {
            assert_eq!(document.composite_depth(), 1);
        }
    }

    #[rstest]
    fn single_slot_bounds_yield_single_children(words: WordPool) {
        let generator = generator(1, 1, 0.5, 4, 0.05);

        for document in documents(&generator, &words, CompositeKind::Object, 37, 50) {
            document.walk(&mut |node| {
                if let Some(count) = node.child_count() {
                    assert_eq!(count, 1);
                }
            });
        }
    }

    #[rstest]
    fn object_keys_come_from_pool(words: WordPool) {
        let generator = generator(2, 4, 0.4, 3, 0.05);

        for document in documents(&generator, &words, CompositeKind::Object, 41, 30) {
            document.walk(&mut |node| {
                if let GeneratedValue::Object(object) = node {
                    for (key, _) in object.iter() {
                        assert!(words.words().iter().any(|word| word == key), "{key}");
                    }
                }
            });
        }
    }

    #[rstest]
    fn same_seed_reproduces_documents(words: WordPool) {
        let generator = generator(1, 4, 0.4, 4, 0.1);

        let first = documents(&generator, &words, CompositeKind::Object, 2026, 20);
        let second = documents(&generator, &words, CompositeKind::Object, 2026, 20);

        assert_eq!(first, second);
    }

    #[rstest]
    fn invalid_nullable_chance_propagates(words: WordPool) {
        let generator = generator(1, 2, -1.0, 1, 3.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = GenerationContext::new(&mut rng, &words);

        let result = generator.build_document(&mut context, CompositeKind::Array);

        assert_eq!(
            result,
            Err(GenerationError::ProbabilityOutOfRange { value: 3.0 })
        );
    }

    #[test]
    fn depth_cap_accepts_the_maximum() {
        let shape = CompositeShape::new(1, 1, 0.5, MAX_NESTED_DEPTH).expect("shape");
        assert_eq!(shape.max_depth(), MAX_NESTED_DEPTH);
    }

    #[rstest]
    #[case(0, 2, 0.2, 1, ConfigError::InvalidSizeBounds { low: 0, high: 2 })]
    #[case(3, 2, 0.2, 1, ConfigError::InvalidSizeBounds { low: 3, high: 2 })]
    #[case(1, 2, 0.2, 0, ConfigError::InvalidDepth { value: 0 })]
    #[case(1, 2, 0.2, 1001, ConfigError::InvalidDepth { value: 1001 })]
    #[case(
        1,
        2,
        1.5,
        1,
        ConfigError::InvalidProbability { flag: "--nested-chance", expected: "at most 1", value: 1.5 }
    )]
    fn shape_rejects_invalid_bounds(
        #[case] low: usize,
        #[case] high: usize,
        #[case] nested_chance: f64,
        #[case] max_depth: usize,
        #[case] expected: ConfigError,
    ) {
        assert_eq!(
            CompositeShape::new(low, high, nested_chance, max_depth),
            Err(expected)
        );
    }
}
