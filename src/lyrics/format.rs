//! Supported lyric source formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A lyric file format this crate can parse and normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LyricFormat {
    /// Apple Music style TTML with word timing, translations and agents.
    Ttml,
    /// Classic line-timed LRC.
    Lrc,
    /// `NetEase` word-timed YRC.
    Yrc,
    /// Lyricify Syllable.
    Lys,
    /// QQ Music word-timed QRC.
    Qrc,
}

impl LyricFormat {
    /// Returns all formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Ttml, Self::Lrc, Self::Yrc, Self::Lys, Self::Qrc]
    }

    /// File extension (without the dot) identifying this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ttml => "ttml",
            Self::Lrc => "lrc",
            Self::Yrc => "yrc",
            Self::Lys => "lys",
            Self::Qrc => "qrc",
        }
    }

    /// Whether the format carries its own translation, romanization and
    /// background/duet metadata.
    #[must_use]
    pub const fn carries_metadata(self) -> bool {
        matches!(self, Self::Ttml)
    }

    /// Look up a format by extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Look up a format from the suffix of a path or URL.
    ///
    /// Query strings and fragments on URLs are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for LyricFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}
