//! URL building helpers.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes a URI component keeps as-is: alphanumerics and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a project identifier for use as a single path segment.
///
/// Numeric IDs pass through untouched; `group/project` becomes `group%2Fproject`.
pub fn encode_project_path(project: &str) -> String {
    utf8_percent_encode(project, URI_COMPONENT).to_string()
}

/// Percent-encode a repository file path for the files API.
///
/// Encoded independently of the project identifier; `src/main.rs` becomes
/// `src%2Fmain.rs`.
pub fn encode_file_path(file_path: &str) -> String {
    utf8_percent_encode(file_path, URI_COMPONENT).to_string()
}

/// Ordered query string builder.
///
/// Optional parameters that are absent or empty are skipped entirely so the
/// remote API never sees `key=`.
#[derive(Debug, Default, Clone)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter that is always sent.
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append a parameter only when a non-empty value is supplied.
    pub fn with_opt(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, urlencoding::encode(value))?;
        }
        Ok(())
    }
}
