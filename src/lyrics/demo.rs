//! Built-in demo document, selected by the `bug` source sentinel.
//!
//! Lines are written as `text,duration|text,duration|...`; word boundaries
//! accumulate from the line's start time.

use crate::error::{Error, Result};
use crate::lyrics::model::LyricLine;
use crate::lyrics::normalize::normalize_timed_line;
use crate::lyrics::raw::{RawLyricLine, RawWord};

/// Build a line from a `text,duration|...` description starting at `start_ms`.
///
/// A duration that is not a whole number of milliseconds fails the build.
pub fn build_line(description: &str, start_ms: u64) -> Result<LyricLine> {
    let mut cursor = start_ms;
    let mut words = Vec::new();

    for part in description.split('|') {
        let (text, duration) = part
            .rsplit_once(',')
            .ok_or_else(|| Error::parse(format!("word {part:?} has no duration"), None))?;
        let duration: u64 = duration
            .trim()
            .parse()
            .map_err(|_| Error::parse(format!("invalid duration {duration:?} for word {text:?}"), None))?;

        words.push(RawWord::with_duration(text, cursor, duration));
        cursor = cursor.saturating_add(duration);
    }

    Ok(normalize_timed_line(RawLyricLine::from_words(words)))
}

/// The three-line demo document.
pub fn demo_lines() -> Result<Vec<LyricLine>> {
    Ok(vec![
        build_line("Apple ,750|Music ,500|Like ,500|Ly,400|ri,500|cs ,250", 1000)?,
        LyricLine {
            is_background_vocal: true,
            ..build_line("BG ,750|Lyrics ,1000", 2000)?
        },
        build_line("Next ,1000|Lyrics,1000", 2500)?,
    ])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn demo_has_one_background_line() {
        let lines = demo_lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_background_vocal);
        assert_eq!(lines[0].end_time, 1000 + 750 + 500 + 500 + 400 + 500 + 250);
    }

    #[test]
    fn word_text_may_contain_commas() {
        let line = build_line("a, b,300", 0).unwrap();
        assert_eq!(line.words[0].text, "a, b");
        assert_eq!(line.end_time, 300);
    }

    #[test]
    fn non_numeric_duration_fails() {
        assert!(matches!(build_line("A,fast", 0), Err(Error::Parse { .. })));
        assert!(matches!(build_line("A", 0), Err(Error::Parse { .. })));
    }
}
