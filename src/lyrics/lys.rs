//! Lyricify Syllable (LYS) parser.
//!
//! ```text
//! [1]Word(190,310)Word2(500,400)
//! ```
//!
//! The bracketed property encodes singer side and background state:
//! 2, 5 and 8 are the right-hand (duet) singer; 6, 7 and 8 are background.

use crate::error::{Error, Result};
use crate::lyrics::raw::RawLyricLine;
use crate::lyrics::syllable::{parse_words, split_header, TextSide};

/// Parse LYS content.
pub fn parse_lys(content: &str) -> Result<Vec<RawLyricLine>> {
    let mut lines = Vec::new();

    for raw in content.lines() {
        let Some((header, body)) = split_header(raw.trim()) else {
            continue;
        };
        if header.contains(':') {
            // Metadata tag such as [ar:...]
            continue;
        }

        let property = if header.is_empty() {
            0
        } else {
            header
                .parse::<u8>()
                .map_err(|_| Error::parse(format!("invalid line property [{header}]"), None))?
        };

        lines.push(RawLyricLine {
            is_background_vocal: matches!(property, 6..=8),
            is_duet: matches!(property, 2 | 5 | 8),
            ..RawLyricLine::from_words(parse_words(body, TextSide::Before)?)
        });
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn reads_property_flags() {
        let lines = parse_lys("[ti:x]\n[1]A(0,100)\n[8]B(100,100)\n[5]C(200,100)").unwrap();
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].is_duet && !lines[0].is_background_vocal);
        assert!(lines[1].is_duet && lines[1].is_background_vocal);
        assert!(lines[2].is_duet && !lines[2].is_background_vocal);
    }

    #[test]
    fn lines_have_no_declared_times() {
        let lines = parse_lys("[4]Hi (1000,200)there(1200,300)").unwrap();
        assert_eq!(lines[0].start_time, None);
        assert_eq!(lines[0].words[1].end_time, 1500);
    }

    #[test]
    fn rejects_non_numeric_property() {
        assert!(parse_lys("[x]A(0,100)").is_err());
    }
}
