//! Word list resolution.
//!
//! Field names come from a line-delimited word list. An explicit path wins;
//! otherwise a local `resources/words` file is used when present, and as a
//! last resort the list is downloaded once, cached in the temp directory for
//! the run, and removed again when the [`WordSource`] is dropped.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::{debug, info, warn};

use crate::error::WordSourceError;

/// Location the word list is downloaded from when no local copy exists.
pub const WORD_LIST_URL: &str =
    "https://raw.githubusercontent.com/gerelef/json-roulette/master/resources/words";

/// Word list looked up relative to the working directory.
pub const LOCAL_WORD_LIST: &str = "resources/words";

/// File name of the downloaded copy inside the cache directory.
pub const FETCHED_FILE_NAME: &str = "tempfile_words";

/// Timeout applied to the single download attempt.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads a word list.
pub trait WordListFetcher {
    /// Fetches the body at `url`. Exactly one attempt is made.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError::Fetch`] if the transfer fails.
    fn fetch(&self, url: &str) -> Result<String, WordSourceError>;
}

/// Fetches word lists over HTTP(S) with a blocking `reqwest` client.
///
/// The client is only built when a download is attempted, so runs served
/// from a local list never start its runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpWordListFetcher {
    timeout: Duration,
}

impl HttpWordListFetcher {
    /// Creates a fetcher with the default request timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpWordListFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl WordListFetcher for HttpWordListFetcher {
    fn fetch(&self, url: &str) -> Result<String, WordSourceError> {
        let fetch_error = |err: reqwest::Error| WordSourceError::Fetch {
            url: url.to_owned(),
            message: err.to_string(),
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(fetch_error)?;
        client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(fetch_error)
    }
}

/// Where a resolved word list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSourceOrigin {
    /// Supplied with `--word-file`.
    Explicit,
    /// Found at the local default path.
    Local,
    /// Downloaded and cached for this run.
    Fetched,
}

/// Decides where the word list is read from.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use json_roulette::{WordListFetcher, WordSourceError, WordSourceOrigin, WordSourceResolver};
///
/// struct Offline;
///
/// impl WordListFetcher for Offline {
///     fn fetch(&self, url: &str) -> Result<String, WordSourceError> {
///         Err(WordSourceError::Fetch { url: url.to_owned(), message: "offline".to_owned() })
///     }
/// }
///
/// let words = Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/words");
/// let source = WordSourceResolver::default()
///     .resolve(Some(&words), &Offline)
///     .expect("explicit path needs no download");
///
/// assert_eq!(source.origin(), WordSourceOrigin::Explicit);
/// assert!(!source.read_words().expect("readable").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSourceResolver {
    local_default: Utf8PathBuf,
    cache_dir: Option<Utf8PathBuf>,
    url: String,
}

impl Default for WordSourceResolver {
    fn default() -> Self {
        Self {
            local_default: Utf8PathBuf::from(LOCAL_WORD_LIST),
            cache_dir: None,
            url: WORD_LIST_URL.to_owned(),
        }
    }
}

impl WordSourceResolver {
    /// Overrides the local default word list path.
    #[must_use]
    pub fn with_local_default(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.local_default = path.into();
        self
    }

    /// Overrides the directory downloaded copies are cached in.
    ///
    /// Defaults to the system temp directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Overrides the download location.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Resolves the word list, downloading it only when neither an explicit
    /// path nor the local default is available.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if the download fails or the cached copy
    /// cannot be written.
    pub fn resolve(
        &self,
        explicit: Option<&Utf8Path>,
        fetcher: &dyn WordListFetcher,
    ) -> Result<WordSource, WordSourceError> {
        if let Some(path) = explicit {
            info!(path = %path, "using word list from --word-file");
            return Ok(WordSource::on_disk(path.to_path_buf(), WordSourceOrigin::Explicit));
        }

        if self.local_default.is_file() {
            info!(path = %self.local_default, "using local word list");
            return Ok(WordSource::on_disk(
                self.local_default.clone(),
                WordSourceOrigin::Local,
            ));
        }

        info!(url = %self.url, "fetching word list");
        let body = fetcher.fetch(&self.url)?;
        let cache_dir = self.cache_dir()?;
        let cached = FetchedCopy::write(&cache_dir, &body)?;
        Ok(WordSource {
            path: cached.path.clone(),
            origin: WordSourceOrigin::Fetched,
            _cached: Some(cached),
        })
    }

    fn cache_dir(&self) -> Result<Utf8PathBuf, WordSourceError> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        Utf8PathBuf::try_from(std::env::temp_dir()).map_err(|err| WordSourceError::Io {
            path: Utf8PathBuf::from(FETCHED_FILE_NAME),
            message: err.to_string(),
        })
    }
}

/// A resolved word list.
///
/// Downloaded copies are deleted when this value is dropped; user-supplied
/// and local files are never touched.
#[derive(Debug)]
pub struct WordSource {
    path: Utf8PathBuf,
    origin: WordSourceOrigin,
    _cached: Option<FetchedCopy>,
}

impl WordSource {
    fn on_disk(path: Utf8PathBuf, origin: WordSourceOrigin) -> Self {
        Self {
            path,
            origin,
            _cached: None,
        }
    }

    /// Returns the path the words are read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns where the word list came from.
    #[must_use]
    pub const fn origin(&self) -> WordSourceOrigin {
        self.origin
    }

    /// Reads the word list, one word per line.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError::Io`] if the file cannot be read and
    /// [`WordSourceError::EmptySource`] if it holds no words.
    pub fn read_words(&self) -> Result<Vec<String>, WordSourceError> {
        let contents = read_word_file(&self.path)?;
        let words = parse_words(&contents);
        if words.is_empty() {
            return Err(WordSourceError::EmptySource);
        }
        debug!(path = %self.path, count = words.len(), "read word list");
        Ok(words)
    }
}

/// Splits a word list into trimmed, non-blank lines.
///
/// # Example
///
/// ```
/// use json_roulette::parse_words;
///
/// assert_eq!(parse_words("owl\n  moss \n\nfern\r\n"), ["owl", "moss", "fern"]);
/// ```
#[must_use]
pub fn parse_words(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn read_word_file(path: &Utf8Path) -> Result<String, WordSourceError> {
    let io_error = |message: String| WordSourceError::Io {
        path: path.to_path_buf(),
        message,
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io_error("word list path must be a file".to_owned()))?;
    let dir = open_parent_dir(path).map_err(|err| io_error(err.to_string()))?;
    dir.read_to_string(file_name)
        .map_err(|err| io_error(err.to_string()))
}

fn open_parent_dir(path: &Utf8Path) -> std::io::Result<Dir> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority())
}

/// Downloaded word list cached for the duration of a run.
#[derive(Debug)]
struct FetchedCopy {
    dir: Dir,
    path: Utf8PathBuf,
}

impl FetchedCopy {
    fn write(cache_dir: &Utf8Path, body: &str) -> Result<Self, WordSourceError> {
        let path = cache_dir.join(FETCHED_FILE_NAME);
        let io_error = |err: std::io::Error| WordSourceError::Io {
            path: path.clone(),
            message: err.to_string(),
        };
        let dir = Dir::open_ambient_dir(cache_dir, ambient_authority()).map_err(io_error)?;
        dir.write(FETCHED_FILE_NAME, body).map_err(io_error)?;
        debug!(path = %path, bytes = body.len(), "cached fetched word list");
        Ok(Self { dir, path })
    }
}

impl Drop for FetchedCopy {
    fn drop(&mut self) {
        if let Err(err) = self.dir.remove_file(FETCHED_FILE_NAME) {
            warn!(path = %self.path, error = %err, "failed to remove fetched word list");
        }
    }
}
