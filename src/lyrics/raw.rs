//! Parser output, before normalization.
//!
//! Each format parser yields these shapes; fields a format cannot express are
//! left at their defaults.

/// A word as read from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawWord {
    /// Word text.
    pub text: String,
    /// Start time in milliseconds.
    pub start_time: u64,
    /// End time in milliseconds.
    pub end_time: u64,
    /// Romanized form, empty when the format has none.
    pub romanized_text: String,
    /// Obscenity flag when the format states one.
    pub is_obscene: Option<bool>,
}

impl RawWord {
    /// Create a word from text and a `[start, end]` span.
    pub fn new(text: impl Into<String>, start_time: u64, end_time: u64) -> Self {
        Self { text: text.into(), start_time, end_time, ..Self::default() }
    }

    /// Create a word from text, start and duration.
    pub fn with_duration(text: impl Into<String>, start_time: u64, duration: u64) -> Self {
        Self::new(text, start_time, start_time.saturating_add(duration))
    }
}

/// A line as read from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLyricLine {
    /// Words in source order.
    pub words: Vec<RawWord>,
    /// Line start declared by the source, if any.
    pub start_time: Option<u64>,
    /// Line end declared by the source, if any.
    pub end_time: Option<u64>,
    /// Translation text.
    pub translated_text: String,
    /// Romanization text.
    pub romanized_text: String,
    /// Background vocal marker.
    pub is_background_vocal: bool,
    /// Duet marker.
    pub is_duet: bool,
}

impl RawLyricLine {
    /// Create a line holding only words.
    pub fn from_words(words: Vec<RawWord>) -> Self {
        Self { words, ..Self::default() }
    }
}
