//! LRC parser.
//!
//! LRC only times whole lines, so every line becomes a single word lasting
//! until the next timestamp in the file.

// Allow expect for compile-time constant regex patterns in LazyLock blocks
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::lyrics::model::LyricLine;
use crate::lyrics::raw::{RawLyricLine, RawWord};

/// Leading `[...]` tag of a line.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\]").expect("valid regex: RE_TAG")
});

/// `mm:ss`, `mm:ss.x`, `mm:ss.xx`, `mm:ss.xxx` or `mm:ss:xx`.
static RE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d+)(?:[.:](\d+))?$").expect("valid regex: RE_STAMP")
});

/// Parse LRC content into one raw line per timestamp.
pub fn parse_lrc(content: &str) -> Result<Vec<RawLyricLine>> {
    let mut offset_ms: i64 = 0;
    let mut entries: Vec<(u64, String)> = Vec::new();

    for (line_no, raw) in content.lines().enumerate() {
        let mut rest = raw.trim();
        let mut stamps = Vec::new();

        while let Some(caps) = RE_TAG.captures(rest) {
            let tag = caps.get(1).map_or("", |m| m.as_str()).trim();
            let whole = caps.get(0).map_or(0, |m| m.end());

            if tag.starts_with(|c: char| c.is_ascii_digit()) {
                stamps.push(parse_stamp(tag).map_err(|e| at_line(e, line_no))?);
            } else if let Some(value) = tag.strip_prefix("offset:") {
                offset_ms = value.trim().parse::<i64>().map_err(|_| {
                    at_line(Error::parse(format!("invalid offset {value:?}"), None), line_no)
                })?;
            }
            // Other metadata tags ([ar:], [ti:], ...) carry no timing.
            rest = &rest[whole..];
        }

        for stamp in stamps {
            entries.push((stamp, rest.to_string()));
        }
    }

    for entry in &mut entries {
        entry.0 = apply_offset(entry.0, offset_ms);
    }
    entries.sort_by_key(|(time, _)| *time);

    let lines = entries
        .iter()
        .enumerate()
        .filter(|(_, (_, text))| !text.trim().is_empty())
        .map(|(i, (start, text))| {
            let end = entries.get(i + 1).map_or(LyricLine::OPEN_END, |(next, _)| *next);
            RawLyricLine::from_words(vec![RawWord::new(text.clone(), *start, end)])
        })
        .collect();

    Ok(lines)
}

/// Parse one `mm:ss[.fff]` stamp into milliseconds.
fn parse_stamp(tag: &str) -> Result<u64> {
    let invalid = || Error::parse(format!("invalid timestamp [{tag}]"), None);
    let caps = RE_STAMP.captures(tag).ok_or_else(invalid)?;

    let minutes: u64 = caps[1].parse().map_err(|_| invalid())?;
    let seconds: u64 = caps[2].parse().map_err(|_| invalid())?;
    let fraction = caps.get(3).map_or(Ok(0), |m| fraction_to_ms(m.as_str()).ok_or_else(invalid))?;

    minutes
        .checked_mul(60_000)
        .and_then(|ms| ms.checked_add(seconds.checked_mul(1000)?))
        .and_then(|ms| ms.checked_add(fraction))
        .ok_or_else(invalid)
}

/// Convert the digits after the decimal point to milliseconds.
///
/// Digits past the third are dropped, never rounded.
pub(crate) fn fraction_to_ms(digits: &str) -> Option<u64> {
    let kept: String = digits.chars().take(3).collect();
    let value: u64 = kept.parse().ok()?;
    Some(match kept.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    })
}

fn apply_offset(time: u64, offset_ms: i64) -> u64 {
    // A positive offset shows lyrics earlier.
    if offset_ms >= 0 {
        time.saturating_sub(offset_ms.unsigned_abs())
    } else {
        time.saturating_add(offset_ms.unsigned_abs())
    }
}

fn at_line(err: Error, line_no: usize) -> Error {
    match err {
        Error::Parse { file, message } => Error::Parse { file, message: format!("line {}: {message}", line_no + 1) },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_stamps_with_varied_precision() {
        assert_eq!(parse_stamp("01:02").unwrap(), 62_000);
        assert_eq!(parse_stamp("01:02.5").unwrap(), 62_500);
        assert_eq!(parse_stamp("01:02.50").unwrap(), 62_500);
        assert_eq!(parse_stamp("01:02.505").unwrap(), 62_505);
        assert_eq!(parse_stamp("01:02:50").unwrap(), 62_500);
        assert_eq!(parse_stamp("00:00.1239").unwrap(), 123);
    }

    #[test]
    fn rejects_garbled_stamp() {
        assert!(matches!(parse_lrc("[01:xx.00]hello"), Err(Error::Parse { .. })));
    }

    #[test]
    fn oversized_stamp_is_parse_error() {
        assert!(matches!(parse_lrc("[999999999999999999:00.00]x"), Err(Error::Parse { .. })));
        assert!(matches!(parse_stamp("00:99999999999999999999"), Err(Error::Parse { .. })));
        assert!(matches!(parse_stamp("307445734561825:59.999"), Err(Error::Parse { .. })));
    }

    #[test]
    fn each_line_runs_until_next_stamp() {
        let lines = parse_lrc("[ti:Song]\n[00:01.00]first\n[00:03.00]second\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].words[0].start_time, 1000);
        assert_eq!(lines[0].words[0].end_time, 3000);
        assert_eq!(lines[1].words[0].end_time, LyricLine::OPEN_END);
    }

    #[test]
    fn repeated_stamps_are_expanded_and_sorted() {
        let lines = parse_lrc("[00:05.00][00:01.00]chorus\n[00:03.00]verse").unwrap();
        let starts: Vec<u64> = lines.iter().map(|l| l.words[0].start_time).collect();
        assert_eq!(starts, vec![1000, 3000, 5000]);
        assert_eq!(lines[0].words[0].text, "chorus");
    }

    #[test]
    fn blank_line_only_closes_previous() {
        let lines = parse_lrc("[00:01.00]sing\n[00:02.00]\n[00:04.00]again").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].words[0].end_time, 2000);
    }

    #[test]
    fn offset_shifts_lines_earlier() {
        let lines = parse_lrc("[offset:500]\n[00:02.00]a\n[00:00.20]b").unwrap();
        assert_eq!(lines[0].words[0].start_time, 0);
        assert_eq!(lines[1].words[0].start_time, 1500);
    }
}
