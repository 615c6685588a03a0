//! Shared scanning for the word-timed formats (YRC, QRC and LYS).
//!
//! All three put a bracketed header in front of each line and mark every word
//! with a parenthesised `(start,duration)` stamp; they differ in what the
//! header holds and on which side of the stamp the word text sits.

// Allow expect for compile-time constant regex patterns in LazyLock blocks
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::lyrics::raw::RawWord;

/// Leading `[...]` header of a line.
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\](.*)$").expect("valid regex: RE_HEADER")
});

/// `(start,duration)` with an optional third field (YRC carries a constant 0).
static RE_WORD_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+),(\d+)(?:,-?\d+)?\)").expect("valid regex: RE_WORD_STAMP")
});

/// Which side of its stamp a word's text is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextSide {
    /// `text(start,duration)` as in QRC and LYS.
    Before,
    /// `(start,duration,0)text` as in YRC.
    After,
}

/// Split a line into its header content and the remainder.
pub(crate) fn split_header(line: &str) -> Option<(&str, &str)> {
    let caps = RE_HEADER.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Parse a `start,duration` header into milliseconds.
pub(crate) fn parse_pair(header: &str) -> Result<(u64, u64)> {
    let mut parts = header.split(',');
    let (Some(start), Some(duration), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::parse(format!("invalid line timing [{header}]"), None));
    };
    Ok((parse_ms(start)?, parse_ms(duration)?))
}

/// Parse a decimal millisecond field.
pub(crate) fn parse_ms(field: &str) -> Result<u64> {
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::parse(format!("invalid time value {field:?}"), None))
}

/// Scan the stamped words of a line body.
pub(crate) fn parse_words(body: &str, side: TextSide) -> Result<Vec<RawWord>> {
    let stamps: Vec<_> = RE_WORD_STAMP.captures_iter(body).collect();
    let mut words = Vec::with_capacity(stamps.len());

    for (i, caps) in stamps.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let start = parse_ms(&caps[1])?;
        let duration = parse_ms(&caps[2])?;

        let text = match side {
            TextSide::Before => {
                let from = if i == 0 { 0 } else { stamps[i - 1].get(0).map_or(0, |m| m.end()) };
                &body[from..whole.start()]
            }
            TextSide::After => {
                let to = stamps.get(i + 1).and_then(|c| c.get(0)).map_or(body.len(), |m| m.start());
                &body[whole.end()..to]
            }
        };

        words.push(RawWord::with_duration(text, start, duration));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn text_after_stamp() {
        let words = parse_words("(100,200,0)Hel(300,100,0)lo", TextSide::After).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hel");
        assert_eq!((words[0].start_time, words[0].end_time), (100, 300));
        assert_eq!(words[1].text, "lo");
    }

    #[test]
    fn text_before_stamp() {
        let words = parse_words("Hel(100,200)lo (300,100)", TextSide::Before).unwrap();
        assert_eq!(words[0].text, "Hel");
        assert_eq!(words[1].text, "lo ");
        assert_eq!(words[1].end_time, 400);
    }

    #[test]
    fn pair_requires_two_numbers() {
        assert_eq!(parse_pair("100,2000").unwrap(), (100, 2000));
        assert!(parse_pair("100").is_err());
        assert!(parse_pair("1x0,20").is_err());
        assert!(parse_pair("1,2,3").is_err());
    }

    #[test]
    fn oversized_stamp_is_a_parse_error() {
        let body = "(99999999999999999999999,1)x";
        assert!(matches!(parse_words(body, TextSide::After), Err(Error::Parse { .. })));
    }
}
