//! `NetEase` YRC parser.
//!
//! ```text
//! [16210,3460](16210,670,0)还(16880,410,0)没
//! ```

use crate::error::Result;
use crate::lyrics::raw::RawLyricLine;
use crate::lyrics::syllable::{parse_pair, parse_words, split_header, TextSide};

/// Parse YRC content. JSON credit lines (`{"t":...}`) are skipped.
pub fn parse_yrc(content: &str) -> Result<Vec<RawLyricLine>> {
    let mut lines = Vec::new();

    for raw in content.lines() {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('{') {
            continue;
        }
        let Some((header, body)) = split_header(raw) else {
            continue;
        };
        if !header.contains(',') {
            // Metadata tag such as [ti:...]
            continue;
        }

        let (start, duration) = parse_pair(header)?;
        let words = parse_words(body, TextSide::After)?;
        lines.push(RawLyricLine {
            start_time: Some(start),
            end_time: Some(start.saturating_add(duration)),
            ..RawLyricLine::from_words(words)
        });
    }

    Ok(lines)
}
