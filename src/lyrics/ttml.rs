//! TTML parser for Apple Music style lyrics.
//!
//! Reads the subset of TTML used for synced lyrics: each `<p>` is a line,
//! timed `<span>`s are words, and role-tagged spans carry background vocals,
//! translations and romanizations:
//!
//! ```xml
//! <p begin="00:01.000" end="00:03.000" ttm:agent="v1">
//!   <span begin="00:01.000" end="00:01.500">Hello</span> <span begin="00:01.500" end="00:03.000">world</span>
//!   <span ttm:role="x-bg"><span begin="00:02.000" end="00:02.800">(world)</span></span>
//!   <span ttm:role="x-translation" xml:lang="zh-CN">你好世界</span>
//! </p>
//! ```
//!
//! A background span becomes its own line directly after the line that holds
//! it. Lines sung by any agent other than the first declared one are duets.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::lyrics::lrc::fraction_to_ms;
use crate::lyrics::raw::{RawLyricLine, RawWord};

/// Agent assumed to be the lead singer when the document declares none.
const DEFAULT_MAIN_AGENT: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Word,
    Background,
    Translation,
    Roman,
    Other,
}

#[derive(Debug, Default)]
struct LineBuilder {
    main: RawLyricLine,
    background: Option<RawLyricLine>,
    agent: Option<String>,
}

#[derive(Debug, Default)]
struct TtmlParser {
    agents: Vec<String>,
    lines: Vec<RawLyricLine>,
    current: Option<LineBuilder>,
    spans: Vec<SpanKind>,
}

/// Parse a TTML document into raw lines.
pub fn parse_ttml(content: &str) -> Result<Vec<RawLyricLine>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut parser = TtmlParser::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => parser.open(&e, false)?,
            Event::Empty(e) => parser.open(&e, true)?,
            Event::End(e) => parser.close(e.local_name().as_ref()),
            Event::Text(t) => parser.text(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parser.lines)
}

impl TtmlParser {
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> Result<()> {
        let attrs = attributes(e)?;
        let attr = |name: &str| attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());

        match e.local_name().as_ref() {
            b"agent" if self.current.is_none() => {
                if let Some(id) = attr("id") {
                    self.agents.push(id.to_string());
                }
            }
            b"p" if !self_closing => {
                self.spans.clear();
                self.current = Some(LineBuilder {
                    main: RawLyricLine {
                        start_time: attr("begin").map(parse_ttml_time).transpose()?,
                        end_time: attr("end").map(parse_ttml_time).transpose()?,
                        ..RawLyricLine::default()
                    },
                    background: None,
                    agent: attr("agent").map(str::to_string),
                });
            }
            b"span" if !self_closing => {
                let Some(line) = self.current.as_mut() else {
                    return Ok(());
                };
                let in_background = self.spans.contains(&SpanKind::Background);
                // Untimed spans inside a translation or romanization keep its role.
                let enclosing = match self.spans.last() {
                    Some(kind @ (SpanKind::Translation | SpanKind::Roman)) => *kind,
                    _ => SpanKind::Other,
                };

                let kind = match attr("role") {
                    Some("x-bg") => {
                        let bg = line.background.get_or_insert_with(RawLyricLine::default);
                        bg.start_time = attr("begin").map(parse_ttml_time).transpose()?.or(bg.start_time);
                        bg.end_time = attr("end").map(parse_ttml_time).transpose()?.or(bg.end_time);
                        SpanKind::Background
                    }
                    Some("x-translation") => SpanKind::Translation,
                    Some("x-roman") => SpanKind::Roman,
                    _ => match (attr("begin"), attr("end")) {
                        (Some(begin), Some(end)) => {
                            let mut word = RawWord::new("", parse_ttml_time(begin)?, parse_ttml_time(end)?);
                            word.is_obscene = attr("obscene").map(|v| v == "true");
                            line_for(line, in_background).words.push(word);
                            SpanKind::Word
                        }
                        _ => enclosing,
                    },
                };
                self.spans.push(kind);
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"span" => {
                self.spans.pop();
            }
            b"p" => self.finish_line(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let Some(line) = self.current.as_mut() else {
            return;
        };
        let in_background = self.spans.contains(&SpanKind::Background);
        let line_start = line.main.start_time;
        let line_end = line.main.end_time;
        let target = line_for(line, in_background);

        match self.spans.last() {
            Some(SpanKind::Word) => {
                if let Some(word) = target.words.last_mut() {
                    word.text.push_str(text);
                }
            }
            Some(SpanKind::Translation) => target.translated_text.push_str(text),
            Some(SpanKind::Roman) => target.romanized_text.push_str(text),
            Some(SpanKind::Background | SpanKind::Other) | None => {
                if text.trim().is_empty() {
                    // Whitespace between word spans separates the words.
                    if let Some(word) = target.words.last_mut() {
                        if !text.is_empty() && !word.text.ends_with(char::is_whitespace) {
                            word.text.push(' ');
                        }
                    }
                } else {
                    // Untimed text: the line itself is the only timing available.
                    let start = line_start.unwrap_or(0);
                    target.words.push(RawWord::new(text, start, line_end.unwrap_or(start)));
                }
            }
        }
    }

    fn finish_line(&mut self) {
        self.spans.clear();
        let Some(LineBuilder { mut main, background, agent }) = self.current.take() else {
            return;
        };

        let main_agent = self.agents.first().map_or(DEFAULT_MAIN_AGENT, String::as_str);
        main.is_duet = agent.as_deref().is_some_and(|a| a != main_agent);
        tidy(&mut main);
        let is_duet = main.is_duet;
        self.lines.push(main);

        if let Some(mut bg) = background {
            if !bg.words.is_empty() {
                bg.is_background_vocal = true;
                bg.is_duet = is_duet;
                tidy(&mut bg);
                self.lines.push(bg);
            }
        }
    }
}

fn line_for(line: &mut LineBuilder, in_background: bool) -> &mut RawLyricLine {
    if in_background {
        line.background.get_or_insert_with(RawLyricLine::default)
    } else {
        &mut line.main
    }
}

fn tidy(line: &mut RawLyricLine) {
    line.translated_text = line.translated_text.trim().to_string();
    line.romanized_text = line.romanized_text.trim().to_string();
    if let Some(last) = line.words.last_mut() {
        let trimmed = last.text.trim_end().len();
        last.text.truncate(trimmed);
    }
}

/// Collect attributes as (local name, unescaped value) pairs.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    e.attributes()
        .map(|attr| -> Result<(String, String)> {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect()
}

/// Parse a TTML clock value (`h:m:s.f`, `m:s.f`, `s.f`, optionally suffixed `s`).
pub fn parse_ttml_time(value: &str) -> Result<u64> {
    let invalid = || Error::parse(format!("invalid TTML time {value:?}"), None);
    let trimmed = value.trim();
    let clock = if trimmed.contains(':') { trimmed } else { trimmed.strip_suffix('s').unwrap_or(trimmed) };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let digits = |s: &str| -> Result<u64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u64>().map_err(|_| invalid())
    };

    let (seconds_part, leading) = parts.split_last().ok_or_else(invalid)?;
    let (whole, fraction) = seconds_part.split_once('.').unwrap_or((seconds_part, ""));
    let mut total = digits(whole)?.checked_mul(1000).ok_or_else(invalid)?;
    if !fraction.is_empty() {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        total = total.checked_add(fraction_to_ms(fraction).ok_or_else(invalid)?).ok_or_else(invalid)?;
    }

    let mut unit: u64 = 60_000;
    for part in leading.iter().rev() {
        let scaled = digits(part)?.checked_mul(unit).ok_or_else(invalid)?;
        total = total.checked_add(scaled).ok_or_else(invalid)?;
        unit = unit.saturating_mul(60);
    }

    Ok(total)
}
