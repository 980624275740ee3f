//! CLI support for the `json-roulette` binary.
//!
//! Parsing and the end-to-end run live here so the binary stays a thin
//! shell and the whole flow can be exercised in tests without spawning a
//! subprocess.

mod error;

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use crate::config::{CliArgs, GenerationConfig};
use crate::driver::{DocumentDriver, RunSummary};
use crate::word_source::{WordListFetcher, WordSourceResolver};

pub use error::CliError;

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Print the rendered help or version text and exit successfully.
    Info(String),
    /// Continue with the validated configuration.
    Config(GenerationConfig),
}

/// Parses and validates command-line arguments.
///
/// `args` includes the program name, as with [`std::env::args_os`].
///
/// # Errors
///
/// Returns [`CliError::Usage`] for malformed arguments and
/// [`CliError::Config`] when the values fail validation.
///
/// # Example
///
/// ```
/// use json_roulette::cli::{ParseOutcome, parse_args};
///
/// let outcome = parse_args([
///     "json-roulette",
///     "--size", "2",
///     "--objects",
///     "--composites-size-low", "1",
///     "--composites-size-high", "3",
/// ])
/// .expect("parse args");
///
/// let ParseOutcome::Config(config) = outcome else {
///     panic!("expected a config");
/// };
/// assert_eq!(config.output_count(), 2);
/// ```
pub fn parse_args<I, T>(args: I) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = match CliArgs::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Ok(ParseOutcome::Info(err.to_string()))
                }
                _ => Err(CliError::Usage {
                    message: err.to_string().trim_end().to_owned(),
                }),
            };
        }
    };
    let config = GenerationConfig::try_from(parsed)?;
    debug!(?config, "parsed configuration");
    Ok(ParseOutcome::Config(config))
}

/// Resolves the word list and writes every document to `out`.
///
/// A downloaded word list is removed before this returns, whether or not
/// generation succeeded. Nothing is written if the word list cannot be
/// resolved.
///
/// # Errors
///
/// Returns [`CliError`] if the word list cannot be resolved or read, or if
/// generation or writing fails.
pub fn run<W>(
    config: GenerationConfig,
    resolver: &WordSourceResolver,
    fetcher: &dyn WordListFetcher,
    out: W,
) -> Result<RunSummary, CliError>
where
    W: Write,
{
    let source = resolver.resolve(config.word_file(), fetcher)?;
    let words = source.read_words()?;
    let mut driver = DocumentDriver::new(config, &words)?;
    let summary = driver.run(out)?;
    drop(source);
    Ok(summary)
}
