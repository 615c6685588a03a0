//! Normalization behaviour shared by every lyric format.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use lyricsync::error::Error;
use lyricsync::lyrics::demo::build_line;
use lyricsync::lyrics::{normalize, LyricFormat, LyricLine};

const TTML: &str = r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:ttm="http://www.w3.org/ns/ttml#metadata">
<head><metadata><ttm:agent type="person" xml:id="v1"/><ttm:agent type="person" xml:id="v2"/></metadata></head>
<body><div>
<p begin="00:01.000" end="00:03.000" ttm:agent="v1"><span begin="00:01.000" end="00:01.500">Hello</span> <span begin="00:01.500" end="00:03.000">world</span><span ttm:role="x-translation">Bonjour</span></p>
<p begin="00:04.000" end="00:05.000" ttm:agent="v2"><span begin="00:04.000" end="00:05.000">Reply</span></p>
</div></body></tt>"#;

fn samples() -> Vec<(LyricFormat, &'static str)> {
    vec![
        (LyricFormat::Ttml, TTML),
        (LyricFormat::Lrc, "[ar:Someone]\n[00:01.00]First line\n[00:03.50]Second line\n"),
        (LyricFormat::Yrc, "[1000,800](1000,300,0)Fi(1300,500,0)rst\n[2000,400](2000,400,0)Two"),
        (LyricFormat::Lys, "[4]Hi (1000,200)there(1200,300)\n[8]Back(1500,100)"),
        (LyricFormat::Qrc, "[ti:Song]\n[190,4110]Word (190,310)Two(500,400)"),
    ]
}

#[test]
fn every_line_is_well_formed() {
    for (format, content) in samples() {
        let lines = normalize(format, content).unwrap();
        assert!(!lines.is_empty(), "{format}: no lines");
        for line in &lines {
            assert!(line.start_time <= line.end_time, "{format}: {line:?}");
            if line.words.is_empty() {
                assert!(line.is_open_ended(), "{format}: empty line must stay open");
            }
        }
    }
}

#[test]
fn only_ttml_keeps_metadata() {
    for (format, content) in samples() {
        let lines = normalize(format, content).unwrap();
        let has_metadata = lines.iter().any(|l| {
            !l.translated_text.is_empty() || !l.romanized_text.is_empty() || l.is_background_vocal || l.is_duet
        });
        assert_eq!(has_metadata, format.carries_metadata(), "{format}");
    }
}

#[test]
fn timed_formats_take_bounds_from_words() {
    let lines = normalize(LyricFormat::Yrc, "[1000,800](1000,300,0)Fi(1300,500,0)rst").unwrap();
    assert_eq!(lines[0].start_time, 1000);
    assert_eq!(lines[0].end_time, 1800);
    assert_eq!(lines[0].text(), "First");
}

#[test]
fn lrc_lines_run_until_the_next_stamp() {
    let lines = normalize(LyricFormat::Lrc, "[00:01.00]First line\n[00:03.50]Second line\n").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].start_time, lines[0].end_time), (1000, 3500));
    assert_eq!(lines[1].start_time, 3500);
    assert!(lines[1].is_open_ended());
}

#[test]
fn lrc_offset_shifts_lines_earlier() {
    let lines = normalize(LyricFormat::Lrc, "[offset:500]\n[00:02.00]Line\n").unwrap();
    assert_eq!(lines[0].start_time, 1500);
}

#[test]
fn ttml_keeps_declared_times_and_duet() {
    let lines = normalize(LyricFormat::Ttml, TTML).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].start_time, lines[0].end_time), (1000, 3000));
    assert_eq!(lines[0].translated_text, "Bonjour");
    assert!(!lines[0].is_duet);
    assert!(lines[1].is_duet);
}

#[test]
fn order_is_preserved_not_sorted() {
    let lines = normalize(LyricFormat::Yrc, "[5000,100](5000,100,0)late\n[1000,100](1000,100,0)early").unwrap();
    assert_eq!(lines[0].text(), "late");
    assert_eq!(lines[1].text(), "early");
}

#[test]
fn malformed_input_is_a_parse_error() {
    assert!(matches!(normalize(LyricFormat::Yrc, "[16210,abc](16210,670,0)x"), Err(Error::Parse { .. })));
    assert!(matches!(normalize(LyricFormat::Ttml, "<tt><body><p begin=\"x\">"), Err(Error::Parse { .. })));
}

#[test]
fn built_line_accumulates_durations() {
    let line = build_line("A,750|B,500|C,500", 1000).unwrap();
    let bounds: Vec<(u64, u64)> = line.words.iter().map(|w| (w.start_time, w.end_time)).collect();
    assert_eq!(bounds, vec![(1000, 1750), (1750, 2250), (2250, 2750)]);
    assert_eq!(line.start_time, 1000);
    assert_eq!(line.end_time, 2750);
}

#[test]
fn normalized_lines_serialize_for_renderers() {
    let lines = normalize(LyricFormat::Lrc, "[00:01.00]Only\n").unwrap();
    let json = serde_json::to_string(&lines).unwrap();
    let back: Vec<LyricLine> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, lines);
}
