//! Error types for the json-roulette command.

use thiserror::Error;

use crate::error::{ConfigError, RunError, WordSourceError};

/// Errors surfaced by argument parsing and the generation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    /// The arguments could not be parsed.
    #[error("{message}")]
    Usage {
        /// Rendered clap diagnostic, usage line included.
        message: String,
    },
    /// The parsed options failed validation.
    #[error("invalid configuration: {source}")]
    Config {
        /// Underlying validation error.
        #[from]
        #[source]
        source: ConfigError,
    },
    /// The word list could not be resolved or read.
    #[error("word list error: {source}")]
    WordSource {
        /// Underlying word source error.
        #[from]
        #[source]
        source: WordSourceError,
    },
    /// Generation or output failed part way through.
    #[error("{source}")]
    Run {
        /// Underlying run error.
        #[from]
        #[source]
        source: RunError,
    },
}
