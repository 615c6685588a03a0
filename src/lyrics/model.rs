//! Normalized lyric schema shared by every source format.

use serde::{Deserialize, Serialize};

/// The smallest time-addressable span of a line, used for progressive highlight.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Word {
    /// Displayed text, including any trailing space.
    pub text: String,
    /// Start time in milliseconds.
    pub start_time: u64,
    /// End time in milliseconds.
    pub end_time: u64,
    /// Whether the word should be masked as obscene.
    pub is_obscene: bool,
    /// Romanized form of this word, empty when unknown.
    pub romanized_text: String,
}

impl Word {
    /// Highlight progress of this word at `time_ms`, from 0.0 to 1.0.
    ///
    /// Overlapping or zero-length words are tolerated: a word whose end is not
    /// after its start is either fully pending or fully sung.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_at(&self, time_ms: u64) -> f64 {
        if time_ms <= self.start_time {
            return 0.0;
        }
        if time_ms >= self.end_time || self.end_time <= self.start_time {
            return 1.0;
        }
        (time_ms - self.start_time) as f64 / (self.end_time - self.start_time) as f64
    }
}

/// One displayed unit of lyric text with timing and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LyricLine {
    /// Words in time order.
    pub words: Vec<Word>,
    /// Start time in milliseconds.
    pub start_time: u64,
    /// End time in milliseconds, or [`LyricLine::OPEN_END`].
    pub end_time: u64,
    /// Translation shown under the line, empty when absent.
    pub translated_text: String,
    /// Romanization shown under the line, empty when absent.
    pub romanized_text: String,
    /// Sung as a background vocal.
    pub is_background_vocal: bool,
    /// Sung by the second singer of a duet.
    pub is_duet: bool,
}

impl LyricLine {
    /// End time of a line that stays open until superseded.
    ///
    /// Compares greater than any real playback position.
    pub const OPEN_END: u64 = u64::MAX;

    /// Whether this line has no end of its own.
    pub const fn is_open_ended(&self) -> bool {
        self.end_time == Self::OPEN_END
    }

    /// Whether `time_ms` falls inside `[start_time, end_time)`.
    pub const fn is_active_at(&self, time_ms: u64) -> bool {
        self.start_time <= time_ms && time_ms < self.end_time
    }

    /// Concatenated text of all words.
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn word(start: u64, end: u64) -> Word {
        Word { text: "la".into(), start_time: start, end_time: end, ..Word::default() }
    }

    #[test]
    fn progress_is_clamped() {
        let w = word(1000, 2000);
        assert!(w.progress_at(500).abs() < f64::EPSILON);
        assert!((w.progress_at(1500) - 0.5).abs() < f64::EPSILON);
        assert!((w.progress_at(2500) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_tolerates_inverted_word() {
        let w = word(2000, 1000);
        assert!((w.progress_at(2001) - 1.0).abs() < f64::EPSILON);
        assert!(w.progress_at(1500).abs() < f64::EPSILON);
    }

    #[test]
    fn open_line_is_active_forever() {
        let line = LyricLine { start_time: 100, end_time: LyricLine::OPEN_END, ..LyricLine::default() };
        assert!(line.is_open_ended());
        assert!(line.is_active_at(u64::MAX - 1));
        assert!(!line.is_active_at(99));
    }

    #[test]
    fn text_joins_words() {
        let line = LyricLine {
            words: vec![
                Word { text: "Hello ".into(), ..Word::default() },
                Word { text: "world".into(), ..Word::default() },
            ],
            ..LyricLine::default()
        };
        assert_eq!(line.text(), "Hello world");
    }
}
