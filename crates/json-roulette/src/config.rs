//! Command-line options and validated generation settings.

use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgGroup, Parser};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::composite::{CompositeKind, CompositeShape};
use crate::error::ConfigError;
use crate::serializer::Style;

/// Default number of words sampled into the pool.
pub const DEFAULT_WORD_SAMPLE_SIZE: usize = 50;

/// Default per-slot nesting probability.
pub const DEFAULT_NESTED_CHANCE: f64 = 0.2;

/// Default depth cap.
pub const DEFAULT_NESTED_MAX_DEPTH: usize = 500;

/// Default probability of a value being `null`.
pub const DEFAULT_NULLABLE_CHANCE: f64 = 0.05;

/// Nesting chance used by `--flat`.
const FLAT_NESTED_CHANCE: f64 = -1.0;

/// Depth cap used by `--flat`.
const FLAT_MAX_DEPTH: usize = 1;

/// `json-roulette` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "json-roulette",
    about = "A barebones JSON generator, for testing",
    version
)]
#[command(group(ArgGroup::new("output_kind").required(true).args(["objects", "arrays"])))]
pub struct CliArgs {
    /// Number of documents to emit.
    #[arg(long = "size", value_name = "count")]
    pub size: usize,
    /// Emit JSON objects.
    #[arg(long)]
    pub objects: bool,
    /// Emit JSON arrays.
    #[arg(long)]
    pub arrays: bool,
    /// Minimum number of children per object or array.
    #[arg(long = "composites-size-low", value_name = "n")]
    pub composites_size_low: usize,
    /// Maximum number of children per object or array.
    #[arg(long = "composites-size-high", value_name = "n")]
    pub composites_size_high: usize,
    /// Line-delimited field name source.
    #[arg(long = "word-file", value_name = "path")]
    pub word_file: Option<Utf8PathBuf>,
    /// Number of words sampled into the field name pool.
    #[arg(long = "word-sample-size", value_name = "n", default_value_t = DEFAULT_WORD_SAMPLE_SIZE)]
    pub word_sample_size: usize,
    /// Never nest composites.
    #[arg(long, conflicts_with = "nested_chance")]
    pub flat: bool,
    /// Probability of a slot holding a nested object or array.
    #[arg(
        long = "nested-chance",
        value_name = "probability",
        default_value_t = DEFAULT_NESTED_CHANCE,
        allow_negative_numbers = true
    )]
    pub nested_chance: f64,
    /// Deepest level of nesting, counting the document itself as 1. At most
    /// 1000.
    #[arg(long = "nested-max-depth", value_name = "n", default_value_t = DEFAULT_NESTED_MAX_DEPTH)]
    pub nested_max_depth: usize,
    /// Indent output with four spaces.
    #[arg(long)]
    pub pretty: bool,
    /// Seed for reproducible output; any text is accepted.
    #[arg(long, value_name = "value", allow_hyphen_values = true)]
    pub seed: Option<String>,
    /// Probability of a value being null; negative disables nulls.
    #[arg(
        long = "nullable-chance",
        value_name = "probability",
        default_value_t = DEFAULT_NULLABLE_CHANCE,
        allow_negative_numbers = true
    )]
    pub nullable_chance: f64,
}

/// Seed for the random source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    /// A decimal integer seed.
    Number(u64),
    /// Any other text, hashed into a full-width seed.
    Text(String),
}

impl Seed {
    /// Interprets `raw` as a number when possible, otherwise as text.
    ///
    /// # Example
    ///
    /// ```
    /// use json_roulette::Seed;
    ///
    /// assert_eq!(Seed::parse("42"), Seed::Number(42));
    /// assert_eq!(Seed::parse("mossy-owl"), Seed::Text("mossy-owl".to_owned()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<u64>()
            .map_or_else(|_| Self::Text(raw.to_owned()), Self::Number)
    }

    /// Builds the random source this seed pins.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        match self {
            Self::Number(value) => ChaCha8Rng::seed_from_u64(*value),
            Self::Text(text) => {
                let digest: [u8; 32] = Sha256::digest(text.as_bytes()).into();
                ChaCha8Rng::from_seed(digest)
            }
        }
    }

    /// Draws a fresh seed from the thread-local entropy source.
    #[must_use]
    pub fn random() -> Self {
        Self::Number(rand::rng().random())
    }
}

/// Validated, immutable settings for one run.
///
/// # Example
///
/// ```
/// use clap::Parser;
/// use json_roulette::{CliArgs, CompositeKind, GenerationConfig};
///
/// let args = CliArgs::try_parse_from([
///     "json-roulette",
///     "--size", "3",
///     "--arrays",
///     "--composites-size-low", "1",
///     "--composites-size-high", "4",
///     "--flat",
/// ])
/// .expect("valid arguments");
/// let config = GenerationConfig::try_from(args).expect("valid config");
///
/// assert_eq!(config.output_count(), 3);
/// assert_eq!(config.output_kind(), CompositeKind::Array);
/// assert_eq!(config.shape().max_depth(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    output_count: usize,
    output_kind: CompositeKind,
    shape: CompositeShape,
    nullable_chance: f64,
    word_sample_size: NonZeroUsize,
    word_file: Option<Utf8PathBuf>,
    style: Style,
    seed: Option<Seed>,
}

impl GenerationConfig {
    /// Creates a config with default pool size, compact output, no word
    /// file, and no seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `output_count` is zero or
    /// `nullable_chance` exceeds one.
    pub fn new(
        output_count: usize,
        output_kind: CompositeKind,
        shape: CompositeShape,
        nullable_chance: f64,
    ) -> Result<Self, ConfigError> {
        if output_count == 0 {
            return Err(ConfigError::InvalidCount {
                value: output_count,
            });
        }
        validate_nullable_chance(nullable_chance)?;
        Ok(Self {
            output_count,
            output_kind,
            shape,
            nullable_chance,
            word_sample_size: default_word_sample_size(),
            word_file: None,
            style: Style::Compact,
            seed: None,
        })
    }

    /// Sets the number of words sampled into the pool.
    #[must_use]
    pub fn with_word_sample_size(mut self, word_sample_size: NonZeroUsize) -> Self {
        self.word_sample_size = word_sample_size;
        self
    }

    /// Sets an explicit word list path.
    #[must_use]
    pub fn with_word_file(mut self, word_file: impl Into<Utf8PathBuf>) -> Self {
        self.word_file = Some(word_file.into());
        self
    }

    /// Sets the output style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Pins the random source to `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the number of documents to emit.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the kind of top-level document.
    #[must_use]
    pub const fn output_kind(&self) -> CompositeKind {
        self.output_kind
    }

    /// Returns the size and nesting bounds.
    #[must_use]
    pub const fn shape(&self) -> &CompositeShape {
        &self.shape
    }

    /// Returns the probability of a value being `null`.
    #[must_use]
    pub const fn nullable_chance(&self) -> f64 {
        self.nullable_chance
    }

    /// Returns the word pool size.
    #[must_use]
    pub const fn word_sample_size(&self) -> NonZeroUsize {
        self.word_sample_size
    }

    /// Returns the explicit word list path, if any.
    #[must_use]
    pub fn word_file(&self) -> Option<&Utf8Path> {
        self.word_file.as_deref()
    }

    /// Returns the output style.
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }
}

impl TryFrom<CliArgs> for GenerationConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.size == 0 {
            return Err(ConfigError::InvalidCount { value: args.size });
        }
        if args.composites_size_low == 0 || args.composites_size_low > args.composites_size_high
        {
            return Err(ConfigError::InvalidSizeBounds {
                low: args.composites_size_low,
                high: args.composites_size_high,
            });
        }
        let word_sample_size = NonZeroUsize::new(args.word_sample_size).ok_or(
            ConfigError::InvalidSampleSize {
                value: args.word_sample_size,
            },
        )?;

        let (nested_chance, nested_max_depth) = if args.flat {
            (FLAT_NESTED_CHANCE, FLAT_MAX_DEPTH)
        } else {
            if !(0.0..=1.0).contains(&args.nested_chance) {
                return Err(ConfigError::InvalidProbability {
                    flag: "--nested-chance",
                    expected: "within [0, 1]",
                    value: args.nested_chance,
                });
            }
            (args.nested_chance, args.nested_max_depth)
        };
        let shape = CompositeShape::new(
            args.composites_size_low,
            args.composites_size_high,
            nested_chance,
            nested_max_depth,
        )?;
        validate_nullable_chance(args.nullable_chance)?;

        let output_kind = if args.objects {
            CompositeKind::Object
        } else {
            CompositeKind::Array
        };

        Ok(Self {
            output_count: args.size,
            output_kind,
            shape,
            nullable_chance: args.nullable_chance,
            word_sample_size,
            word_file: args.word_file,
            style: Style::from_pretty(args.pretty),
            seed: args.seed.as_deref().map(Seed::parse),
        })
    }
}

fn validate_nullable_chance(value: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value > 1.0 {
        return Err(ConfigError::InvalidProbability {
            flag: "--nullable-chance",
            expected: "at most 1",
            value,
        });
    }
    Ok(())
}

const fn default_word_sample_size() -> NonZeroUsize {
    match NonZeroUsize::new(DEFAULT_WORD_SAMPLE_SIZE) {
        Some(size) => size,
        None => NonZeroUsize::MIN,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const REQUIRED: [&str; 8] = [
        "json-roulette",
        "--size",
        "2",
        "--objects",
        "--composites-size-low",
        "1",
        "--composites-size-high",
        "3",
    ];

    fn parse(extra: &[&str]) -> Result<CliArgs, clap::Error> {
        let mut args: Vec<&str> = REQUIRED.to_vec();
        args.extend_from_slice(extra);
        CliArgs::try_parse_from(args)
    }

    fn config(extra: &[&str]) -> Result<GenerationConfig, ConfigError> {
        GenerationConfig::try_from(parse(extra).expect("arguments should parse"))
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "tolerance check on parsed floats")]
    fn defaults_are_applied() {
        let config = config(&[]).expect("valid config");

        assert_eq!(config.output_count(), 2);
        assert_eq!(config.output_kind(), CompositeKind::Object);
        assert_eq!(config.shape().size_low(), 1);
        assert_eq!(config.shape().size_high(), 3);
        assert!((config.shape().nested_chance() - DEFAULT_NESTED_CHANCE).abs() < f64::EPSILON);
        assert_eq!(config.shape().max_depth(), DEFAULT_NESTED_MAX_DEPTH);
        assert!((config.nullable_chance() - DEFAULT_NULLABLE_CHANCE).abs() < f64::EPSILON);
        assert_eq!(config.word_sample_size().get(), DEFAULT_WORD_SAMPLE_SIZE);
        assert_eq!(config.word_file(), None);
        assert_eq!(config.style(), Style::Compact);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn flat_disables_nesting() {
        let config = config(&["--flat", "--nested-max-depth", "9"]).expect("valid config");

        assert!(config.shape().nested_chance() < 0.0);
        assert_eq!(config.shape().max_depth(), 1);
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "tolerance check on parsed floats")]
    fn optional_flags_are_carried_through() {
        let config = config(&[
            "--pretty",
            "--seed",
            "42",
            "--word-file",
            "words.txt",
            "--word-sample-size",
            "7",
            "--nullable-chance",
            "-1",
            "--nested-chance",
            "0.5",
            "--nested-max-depth",
            "3",
        ])
        .expect("valid config");

        assert_eq!(config.style(), Style::Pretty);
        assert_eq!(config.seed(), Some(&Seed::Number(42)));
        assert_eq!(config.word_file(), Some(Utf8Path::new("words.txt")));
        assert_eq!(config.word_sample_size().get(), 7);
        assert!(config.nullable_chance() < 0.0);
        assert!((config.shape().nested_chance() - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.shape().max_depth(), 3);
    }

    #[rstest]
    #[case(&["--arrays"])]
    #[case(&["--flat", "--nested-chance", "0.4"])]
    fn mutually_exclusive_flags_are_rejected(#[case] extra: &[&str]) {
        let err = parse(extra).expect_err("conflicting flags");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn output_kind_is_required() {
        let err = CliArgs::try_parse_from([
            "json-roulette",
            "--size",
            "1",
            "--composites-size-low",
            "1",
            "--composites-size-high",
            "1",
        ])
        .expect_err("missing kind");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[rstest]
    #[case::zero_sample(
        &["--word-sample-size", "0"],
        ConfigError::InvalidSampleSize { value: 0 }
    )]
    #[case::zero_depth(&["--nested-max-depth", "0"], ConfigError::InvalidDepth { value: 0 })]
    #[case::depth_above_maximum(
        &["--nested-max-depth", "20000"],
        ConfigError::InvalidDepth { value: 20000 }
    )]
    #[case::nested_above_one(
        &["--nested-chance", "1.5"],
        ConfigError::InvalidProbability { flag: "--nested-chance", expected: "within [0, 1]", value: 1.5 }
    )]
    #[case::nested_negative(
        &["--nested-chance", "-0.5"],
        ConfigError::InvalidProbability { flag: "--nested-chance", expected: "within [0, 1]", value: -0.5 }
    )]
    #[case::nullable_above_one(
        &["--nullable-chance", "1.01"],
        ConfigError::InvalidProbability { flag: "--nullable-chance", expected: "at most 1", value: 1.01 }
    )]
    fn invalid_values_are_rejected(#[case] extra: &[&str], #[case] expected: ConfigError) {
        assert_eq!(config(extra), Err(expected));
    }

    #[test]
    fn zero_documents_are_rejected() {
        let args = CliArgs::try_parse_from([
            "json-roulette",
            "--size",
            "0",
            "--objects",
            "--composites-size-low",
            "1",
            "--composites-size-high",
            "1",
        ])
        .expect("arguments should parse");

        assert_eq!(
            GenerationConfig::try_from(args),
            Err(ConfigError::InvalidCount { value: 0 })
        );
    }

    #[test]
    fn size_bounds_must_be_ordered() {
        let args = CliArgs::try_parse_from([
            "json-roulette",
            "--size",
            "1",
            "--arrays",
            "--composites-size-low",
            "5",
            "--composites-size-high",
            "2",
        ])
        .expect("arguments should parse");

        assert_eq!(
            GenerationConfig::try_from(args),
            Err(ConfigError::InvalidSizeBounds { low: 5, high: 2 })
        );
    }

    #[rstest]
    #[case("0", Seed::Number(0))]
    #[case("18446744073709551615", Seed::Number(u64::MAX))]
    #[case("-3", Seed::Text("-3".to_owned()))]
    #[case("1.5", Seed::Text("1.5".to_owned()))]
    fn seeds_parse_numbers_then_text(#[case] raw: &str, #[case] expected: Seed) {
        assert_eq!(Seed::parse(raw), expected);
    }

    #[test]
    fn text_seeds_are_reproducible() {
        let mut first = Seed::parse("mossy-owl").rng();
        let mut second = Seed::parse("mossy-owl").rng();
        let mut other = Seed::parse("snowy-penguin").rng();

        let value: u64 = first.random();
        assert_eq!(value, second.random::<u64>());
        assert_ne!(value, other.random::<u64>());
    }

    #[test]
    fn builder_rejects_zero_count() {
        let shape = CompositeShape::new(1, 1, -1.0, 1).expect("shape");
        assert_eq!(
            GenerationConfig::new(0, CompositeKind::Array, shape, 0.1),
            Err(ConfigError::InvalidCount { value: 0 })
        );
    }
}
