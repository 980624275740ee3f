//! Command-line entry point for json-roulette.
//!
//! This binary delegates to `json_roulette::cli` for parsing and the
//! generation run, keeping its own logic limited to process wiring.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use json_roulette::cli::{CliError, ParseOutcome, parse_args, run};
use json_roulette::{HttpWordListFetcher, WordSourceResolver};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute() -> Result<(), CliError> {
    match parse_args(env::args_os())? {
        ParseOutcome::Info(text) => {
            if let Err(err) = write!(io::stdout().lock(), "{text}") {
                drop(err);
            }
            Ok(())
        }
        ParseOutcome::Config(config) => {
            let out = BufWriter::new(io::stdout().lock());
            run(
                config,
                &WordSourceResolver::default(),
                &HttpWordListFetcher::new(),
                out,
            )?;
            Ok(())
        }
    }
}
