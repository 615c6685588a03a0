//! Lyric source resolution and loading.
//!
//! A source string is either the demo sentinel, an `http(s)` URL or a file
//! path; its suffix selects the format. Loading fetches the text, parses it
//! and normalizes it in one step, with no retries.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::constants::source::{DEMO_SENTINEL, FETCH_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::lyrics::{demo, normalize, LyricFormat, LyricLine};

/// Where a lyric document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricSource {
    /// The built-in demo document.
    Demo,
    /// A remote document fetched over HTTP.
    Remote {
        /// Document URL.
        url: String,
        /// Format chosen from the URL suffix.
        format: LyricFormat,
    },
    /// A local file.
    File {
        /// Tilde-expanded file path.
        path: PathBuf,
        /// Format chosen from the file suffix.
        format: LyricFormat,
    },
}

impl LyricSource {
    /// Resolve a source string.
    ///
    /// An unrecognized suffix is an [`Error::UnsupportedFormat`].
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source == DEMO_SENTINEL {
            return Ok(Self::Demo);
        }

        let format = LyricFormat::from_path(source).ok_or_else(|| Error::unsupported(source))?;
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Self::Remote { url: source.to_string(), format })
        } else {
            let path = PathBuf::from(shellexpand::tilde(source).to_string());
            Ok(Self::File { path, format })
        }
    }

    /// Format of the document, `None` for the demo.
    pub const fn format(&self) -> Option<LyricFormat> {
        match self {
            Self::Demo => None,
            Self::Remote { format, .. } | Self::File { format, .. } => Some(*format),
        }
    }
}

/// Retrieves the raw text of a lyric document.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch the document at `url`.
    async fn fetch_url(&self, url: &str) -> Result<String>;

    /// Read the document at `path`.
    async fn read_file(&self, path: &std::path::Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(e, path.to_path_buf()))
    }
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_url(&self, url: &str) -> Result<String> {
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Network(format!("Request to {url} returned {status}")));
        }

        resp.text()
            .await
            .map_err(|e| Error::Network(format!("Reading body of {url} failed: {e}")))
    }
}

/// Fetch, parse and normalize the document behind `source`.
pub async fn load_lyrics(source: &LyricSource, fetcher: &dyn TextFetcher) -> Result<Vec<LyricLine>> {
    let lines = match source {
        LyricSource::Demo => demo::demo_lines()?,
        LyricSource::Remote { url, format } => {
            let content = fetcher.fetch_url(url).await?;
            normalize(*format, &content)?
        }
        LyricSource::File { path, format } => {
            let content = fetcher.read_file(path).await?;
            normalize(*format, &content).map_err(|e| e.with_file(path.clone()))?
        }
    };

    tracing::info!("Loaded {} lyric lines from {source:?}", lines.len());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn sentinel_selects_demo() {
        assert_eq!(LyricSource::parse("bug").unwrap(), LyricSource::Demo);
        assert_eq!(LyricSource::Demo.format(), None);
    }

    #[test]
    fn urls_are_remote() {
        let src = LyricSource::parse("https://example.com/a.ttml").unwrap();
        assert_eq!(src.format(), Some(LyricFormat::Ttml));
        assert!(matches!(src, LyricSource::Remote { .. }));
    }

    #[test]
    fn paths_are_files() {
        let src = LyricSource::parse("./assets/song.lrc").unwrap();
        match src {
            LyricSource::File { path, format } => {
                assert_eq!(path, PathBuf::from("./assets/song.lrc"));
                assert_eq!(format, LyricFormat::Lrc);
            }
            other => panic!("Expected file source, got {other:?}"),
        }
    }

    #[test]
    fn unknown_suffix_is_explicit_error() {
        assert!(matches!(
            LyricSource::parse("./assets/song.srt"),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}
