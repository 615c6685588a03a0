//! Loading lyric documents from files and the demo sentinel.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::Write;

use async_trait::async_trait;
use lyricsync::error::{Error, Result};
use lyricsync::playback::PlaybackClock;
use lyricsync::player::Player;
use lyricsync::source::{load_lyrics, HttpFetcher, LyricSource, TextFetcher};
use lyricsync::ui::{backdrop_factory, SharedBackdrop, TerminalLyricView};

/// Fetcher serving one fixed body for every URL.
struct StaticFetcher(Option<&'static str>);

#[async_trait]
impl TextFetcher for StaticFetcher {
    async fn fetch_url(&self, url: &str) -> Result<String> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| Error::Network(format!("{url} unreachable")))
    }
}

fn lyric_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn player() -> Player<TerminalLyricView> {
    Player::new(PlaybackClock::mock(), TerminalLyricView::new(), backdrop_factory(&SharedBackdrop::default()))
}

#[tokio::test]
async fn loads_demo_without_fetching() {
    let lines = load_lyrics(&LyricSource::Demo, &StaticFetcher(None)).await.unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].is_background_vocal);
}

#[tokio::test]
async fn loads_file_by_suffix() {
    let file = lyric_file(".lrc", "[00:01.00]One\n[00:02.00]Two\n");
    let source = LyricSource::parse(file.path().to_str().unwrap()).unwrap();

    let lines = load_lyrics(&source, &HttpFetcher::new()).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].text(), "Two");
}

#[tokio::test]
async fn parse_errors_name_the_file() {
    let file = lyric_file(".yrc", "[100,xx](100,10,0)a");
    let source = LyricSource::parse(file.path().to_str().unwrap()).unwrap();

    match load_lyrics(&source, &HttpFetcher::new()).await {
        Err(Error::Parse { file: Some(path), .. }) => assert_eq!(path, file.path()),
        other => panic!("Expected parse error with file, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let source = LyricSource::parse("/definitely/not/here.ttml").unwrap();
    assert!(matches!(load_lyrics(&source, &HttpFetcher::new()).await, Err(Error::Io { .. })));
}

#[tokio::test]
async fn remote_body_is_normalized_by_url_suffix() {
    let source = LyricSource::parse("https://example.com/song.qrc?v=2").unwrap();
    let lines = load_lyrics(&source, &StaticFetcher(Some("[0,500]A(0,200)B(200,300)"))).await.unwrap();
    assert_eq!(lines[0].text(), "AB");
    assert_eq!(lines[0].end_time, 500);
}

#[tokio::test]
async fn failed_reload_keeps_current_lines() {
    let mut player = player();
    let loaded = player.reload(&LyricSource::Demo, &StaticFetcher(None)).await.unwrap();
    assert_eq!(loaded, 3);

    let remote = LyricSource::parse("https://example.com/song.ttml").unwrap();
    assert!(matches!(player.reload(&remote, &StaticFetcher(None)).await, Err(Error::Network(_))));
    assert_eq!(player.line_count(), 3);
    assert_eq!(player.renderer().lines().len(), 3);
}
