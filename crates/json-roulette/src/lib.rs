//! Random JSON fixture generation for testing.
//!
//! This crate builds pseudo-random JSON documents: objects keyed by words
//! drawn from a word list, or arrays, populated with strings, integers,
//! doubles, booleans, nulls, and nested composites up to a depth cap. Runs
//! are reproducible when a seed is supplied.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Resolving a word list from an explicit file, a local default, or a
//!   one-shot download that is cleaned up after the run
//! - Sampling a sorted word pool from that list
//! - Building composite documents with configurable size, nesting, and
//!   nullability
//! - Rendering compact or pretty JSON, one document after another
//!
//! # Example
//!
//! ```
//! use json_roulette::{
//!     CompositeKind, CompositeShape, DocumentDriver, GenerationConfig, Seed,
//! };
//!
//! let shape = CompositeShape::new(2, 2, -1.0, 1).expect("valid shape");
//! let config = GenerationConfig::new(1, CompositeKind::Object, shape, -1.0)
//!     .expect("valid config")
//!     .with_seed(Seed::Number(42));
//! let words = vec!["heron".to_owned(), "lichen".to_owned(), "quartz".to_owned()];
//!
//! let mut driver = DocumentDriver::new(config, &words).expect("driver");
//! let document = driver.next_document().expect("document");
//!
//! let text = json_roulette::render(&document, json_roulette::Style::Compact)
//!     .expect("render");
//! assert!(text.starts_with('{'));
//! ```

pub mod cli;
mod composite;
mod config;
mod driver;
mod error;
mod primitive;
mod probability;
mod serializer;
mod value;
mod word_pool;
mod word_source;

pub use composite::{
    CompositeGenerator, CompositeKind, CompositeShape, GenerationContext, MAX_NESTED_DEPTH,
    ROOT_DEPTH, ROOT_NULLABLE_CHANCE,
};
pub use config::{
    CliArgs, DEFAULT_NESTED_CHANCE, DEFAULT_NESTED_MAX_DEPTH, DEFAULT_NULLABLE_CHANCE,
    DEFAULT_WORD_SAMPLE_SIZE, GenerationConfig, Seed,
};
pub use driver::{DocumentDriver, Documents, RunSummary};
pub use error::{ConfigError, GenerationError, RunError, WordSourceError};
pub use primitive::{DEFAULT_STRING_LENGTH, PrimitiveGenerator, PrimitiveKind};
pub use probability::decide;
pub use serializer::{Style, render};
pub use value::{GeneratedValue, ObjectNode};
pub use word_pool::WordPool;
pub use word_source::{
    FETCHED_FILE_NAME, HttpWordListFetcher, LOCAL_WORD_LIST, WORD_LIST_URL, WordListFetcher,
    WordSource, WordSourceOrigin, WordSourceResolver, parse_words,
};
