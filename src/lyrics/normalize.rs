//! Format normalization: every parser's output becomes [`LyricLine`]s.
//!
//! Word-timed and line-timed formats take all line timing from their words
//! and drop any metadata. TTML keeps its translation, romanization,
//! background and duet data as parsed. Neither path sorts or validates: the
//! order delivered by the parser is the order returned.

use crate::error::Result;
use crate::lyrics::format::LyricFormat;
use crate::lyrics::model::{LyricLine, Word};
use crate::lyrics::raw::{RawLyricLine, RawWord};
use crate::lyrics::{lrc, lys, qrc, ttml, yrc};

/// Parse `content` as `format` and normalize the result.
pub fn normalize(format: LyricFormat, content: &str) -> Result<Vec<LyricLine>> {
    let lines: Vec<LyricLine> = match format {
        LyricFormat::Ttml => ttml::parse_ttml(content)?.into_iter().map(normalize_markup_line).collect(),
        LyricFormat::Lrc => normalize_timed(lrc::parse_lrc(content)?),
        LyricFormat::Yrc => normalize_timed(yrc::parse_yrc(content)?),
        LyricFormat::Lys => normalize_timed(lys::parse_lys(content)?),
        LyricFormat::Qrc => normalize_timed(qrc::parse_qrc(content)?),
    };
    Ok(lines)
}

fn normalize_timed(lines: Vec<RawLyricLine>) -> Vec<LyricLine> {
    lines.into_iter().map(normalize_timed_line).collect()
}

/// Normalize a line from a format without line metadata.
///
/// Line bounds come from the first and last word; an empty line starts at 0
/// and stays open. Metadata the parser may have read is reset.
pub fn normalize_timed_line(line: RawLyricLine) -> LyricLine {
    let start_time = line.words.first().map_or(0, |w| w.start_time);
    let end_time = line.words.last().map_or(LyricLine::OPEN_END, |w| w.end_time);

    LyricLine {
        words: line.words.into_iter().map(normalize_word).collect(),
        start_time,
        end_time,
        translated_text: String::new(),
        romanized_text: String::new(),
        is_background_vocal: false,
        is_duet: false,
    }
}

/// Normalize a line from a metadata-carrying format.
///
/// Declared line times win and missing ones fall back to the word bounds.
/// A line without words stays open whatever end it declares.
pub fn normalize_markup_line(line: RawLyricLine) -> LyricLine {
    let start_time = line
        .start_time
        .or_else(|| line.words.first().map(|w| w.start_time))
        .unwrap_or(0);
    let end_time = match line.words.last() {
        Some(last) => line.end_time.unwrap_or(last.end_time),
        None => LyricLine::OPEN_END,
    };

    LyricLine {
        words: line.words.into_iter().map(normalize_word).collect(),
        start_time,
        end_time,
        translated_text: line.translated_text,
        romanized_text: line.romanized_text,
        is_background_vocal: line.is_background_vocal,
        is_duet: line.is_duet,
    }
}

fn normalize_word(word: RawWord) -> Word {
    Word {
        text: word.text,
        start_time: word.start_time,
        end_time: word.end_time,
        is_obscene: word.is_obscene.unwrap_or(false),
        romanized_text: word.romanized_text,
    }
}
