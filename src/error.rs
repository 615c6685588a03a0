//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, HTTP status)
    #[error("Network error: {0}")]
    Network(String),

    /// Lyric parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// Lyric source that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// The lyric source names no format this crate can read
    #[error("Unsupported lyric source {selector:?}: expected .ttml, .lrc, .yrc, .lys, .qrc or the demo sentinel")]
    UnsupportedFormat {
        /// The source string as given by the caller.
        selector: String,
    },

    /// Media backend refused to start or continue playback
    #[error("Playback error: {0}")]
    Playback(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create an unsupported-format error for the given source string
    pub fn unsupported(selector: impl Into<String>) -> Self {
        Self::UnsupportedFormat { selector: selector.into() }
    }

    /// Attach a file path to a parse error that has none yet.
    #[must_use]
    pub fn with_file(self, path: impl Into<std::path::PathBuf>) -> Self {
        match self {
            Self::Parse { file: None, message } => Self::Parse { file: Some(path.into()), message },
            other => other,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::parse(format!("malformed TTML: {e}"), None)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::parse(format!("malformed TTML attribute: {e}"), None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::path::PathBuf;

    #[test]
    fn with_file_fills_missing_path() {
        let err = Error::parse("bad stamp", None).with_file("song.lrc");
        match err {
            Error::Parse { file: Some(f), .. } => assert_eq!(f, PathBuf::from("song.lrc")),
            _ => panic!("Expected Parse error with file"),
        }
    }

    #[test]
    fn with_file_keeps_existing_path() {
        let err = Error::parse("bad stamp", PathBuf::from("a.lrc")).with_file("b.lrc");
        match err {
            Error::Parse { file: Some(f), .. } => assert_eq!(f, PathBuf::from("a.lrc")),
            _ => panic!("Expected Parse error with original file"),
        }
    }

    #[test]
    fn unsupported_format_names_source() {
        let msg = Error::unsupported("song.srt").to_string();
        assert!(msg.contains("song.srt"));
        assert!(msg.contains(".ttml"));
    }
}
