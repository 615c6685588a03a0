//! QQ Music QRC parser.
//!
//! ```text
//! [190,4110]Word(190,310)Word2(500,400)
//! ```
//!
//! Files exported from the client wrap the lyric in an XML
//! `LyricContent="..."` attribute; that wrapper is removed first.

// Allow expect for compile-time constant regex patterns in LazyLock blocks
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::lyrics::raw::RawLyricLine;
use crate::lyrics::syllable::{parse_pair, parse_words, split_header, TextSide};

static RE_LYRIC_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)LyricContent="(.*?)""#).expect("valid regex: RE_LYRIC_CONTENT")
});

/// Parse QRC content.
pub fn parse_qrc(content: &str) -> Result<Vec<RawLyricLine>> {
    let content = RE_LYRIC_CONTENT
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(content, |m| m.as_str());

    let mut lines = Vec::new();
    for raw in content.lines() {
        let Some((header, body)) = split_header(raw.trim()) else {
            continue;
        };
        if !header.contains(',') {
            continue;
        }

        let (start, duration) = parse_pair(header)?;
        let words = parse_words(body, TextSide::Before)?;
        lines.push(RawLyricLine {
            start_time: Some(start),
            end_time: Some(start.saturating_add(duration)),
            ..RawLyricLine::from_words(words)
        });
    }

    Ok(lines)
}
