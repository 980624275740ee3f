//! JSON rendering of generated documents.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::value::GeneratedValue;

/// Indentation used for pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// Layout of rendered documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// One line per document, no insignificant whitespace.
    #[default]
    Compact,
    /// Four-space indentation.
    Pretty,
}

impl Style {
    /// Maps the `--pretty` flag onto a style.
    #[must_use]
    pub const fn from_pretty(pretty: bool) -> Self {
        if pretty { Self::Pretty } else { Self::Compact }
    }
}

/// Renders a document as JSON text.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
///
/// # Example
///
/// ```
/// use json_roulette::{GeneratedValue, Style, render};
///
/// let value = GeneratedValue::Array(vec![GeneratedValue::Integer(1), GeneratedValue::Null]);
///
/// assert_eq!(render(&value, Style::Compact).expect("render"), "[1,null]");
/// assert_eq!(
///     render(&value, Style::Pretty).expect("render"),
///     "[\n    1,\n    null\n]"
/// );
/// ```
pub fn render(value: &GeneratedValue, style: Style) -> Result<String, serde_json::Error> {
    match style {
        Style::Compact => serde_json::to_string(value),
        Style::Pretty => {
            let mut buffer = Vec::new();
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
            value.serialize(&mut serializer)?;
            // serde_json only ever emits UTF-8.
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        }
    }
}
