//! Error types for the json-roulette crate.
//!
//! This module defines semantic error enums for configuration validation,
//! word list resolution, and document generation, following the project's
//! error handling conventions with `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::composite::MAX_NESTED_DEPTH;

/// Errors raised while validating generation options.
///
/// Every variant is fatal and reported before any word list is read or any
/// document generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The number of documents to emit was zero.
    #[error("--size must be at least 1, got {value}")]
    InvalidCount {
        /// Value supplied for `--size`.
        value: usize,
    },

    /// The composite size bounds are empty or start below one.
    #[error("composite size bounds must satisfy 1 <= low <= high, got low={low}, high={high}")]
    InvalidSizeBounds {
        /// Value supplied for `--composites-size-low`.
        low: usize,
        /// Value supplied for `--composites-size-high`.
        high: usize,
    },

    /// A probability flag was outside its accepted range.
    #[error("{flag} must be {expected}, got {value}")]
    InvalidProbability {
        /// Flag that carried the probability.
        flag: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
        /// Value supplied for the flag.
        value: f64,
    },

    /// The nesting depth cap was zero or above [`MAX_NESTED_DEPTH`].
    #[error("--nested-max-depth must be within [1, {max}], got {value}", max = MAX_NESTED_DEPTH)]
    InvalidDepth {
        /// Value supplied for `--nested-max-depth`.
        value: usize,
    },

    /// The word pool sample size was zero.
    #[error("--word-sample-size must be at least 1, got {value}")]
    InvalidSampleSize {
        /// Value supplied for `--word-sample-size`.
        value: usize,
    },
}

/// Errors that can occur when resolving or reading the word list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordSourceError {
    /// The word list file could not be read or written.
    #[error("failed to access word list at '{path}': {message}")]
    Io {
        /// Path to the word list file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The word list could not be downloaded.
    #[error("failed to fetch word list from {url}: {message}")]
    Fetch {
        /// Location the word list was requested from.
        url: String,
        /// Description of the transport error.
        message: String,
    },

    /// The word list contained no usable words.
    #[error("word list contains no words")]
    EmptySource,
}

/// Errors raised by the generator itself.
///
/// These indicate programming bugs rather than bad input: validated
/// configuration never produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// A probability above one (or NaN) reached the decider.
    #[error("probability must not exceed 1.0, got {value}")]
    ProbabilityOutOfRange {
        /// Offending probability.
        value: f64,
    },
}

/// Errors that can abort a generation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// The generator rejected its own inputs.
    #[error("generation failed: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },

    /// A document could not be rendered as JSON.
    #[error("failed to render document {index}: {message}")]
    Render {
        /// Zero-based index of the document.
        index: usize,
        /// Description of the serialization error.
        message: String,
    },

    /// Rendered output could not be written.
    #[error("failed to write output: {message}")]
    Write {
        /// Description of the I/O error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_count_formats_correctly() {
        let err = ConfigError::InvalidCount { value: 0 };
        assert_eq!(err.to_string(), "--size must be at least 1, got 0");
    }

    #[test]
    fn config_error_size_bounds_formats_correctly() {
        let err = ConfigError::InvalidSizeBounds { low: 4, high: 2 };
        assert_eq!(
            err.to_string(),
            "composite size bounds must satisfy 1 <= low <= high, got low=4, high=2"
        );
    }

    #[test]
    fn config_error_probability_formats_correctly() {
        let err = ConfigError::InvalidProbability {
            flag: "--nested-chance",
            expected: "within [0, 1]",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "--nested-chance must be within [0, 1], got 1.5");
    }

    #[test]
    fn config_error_depth_formats_correctly() {
        let err = ConfigError::InvalidDepth { value: 0 };
        assert_eq!(err.to_string(), "--nested-max-depth must be within [1, 1000], got 0");
    }

    #[test]
    fn config_error_sample_size_formats_correctly() {
        let err = ConfigError::InvalidSampleSize { value: 0 };
        assert_eq!(err.to_string(), "--word-sample-size must be at least 1, got 0");
    }

    #[test]
    fn word_source_error_io_formats_correctly() {
        let err = WordSourceError::Io {
            path: Utf8PathBuf::from("/tmp/words"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to access word list at '/tmp/words': file not found"
        );
    }

    #[test]
    fn word_source_error_fetch_formats_correctly() {
        let err = WordSourceError::Fetch {
            url: "https://example.invalid/words".to_owned(),
            message: "connection refused".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch word list from https://example.invalid/words: connection refused"
        );
    }

    #[test]
    fn word_source_error_empty_formats_correctly() {
        assert_eq!(
            WordSourceError::EmptySource.to_string(),
            "word list contains no words"
        );
    }

    #[test]
    fn generation_error_probability_formats_correctly() {
        let err = GenerationError::ProbabilityOutOfRange { value: 1.25 };
        assert_eq!(err.to_string(), "probability must not exceed 1.0, got 1.25");
    }

    #[test]
    fn run_error_generation_wraps_source() {
        let err = RunError::from(GenerationError::ProbabilityOutOfRange { value: 2.0 });
        assert_eq!(
            err.to_string(),
            "generation failed: probability must not exceed 1.0, got 2"
        );
    }

    #[test]
    fn run_error_render_formats_correctly() {
        let err = RunError::Render {
            index: 3,
            message: "key must be a string".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to render document 3: key must be a string"
        );
    }

    #[test]
    fn run_error_write_formats_correctly() {
        let err = RunError::Write {
            message: "broken pipe".to_owned(),
        };
        assert_eq!(err.to_string(), "failed to write output: broken pipe");
    }
}
