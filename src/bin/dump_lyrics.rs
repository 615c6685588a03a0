//! Dump a lyric document as normalized JSON lines.
//!
//! Usage: cargo run --bin dump_lyrics [-- <path|url|bug>]
//!
//! Without an argument the `LYRIC_SOURCE` setting is used.

use anyhow::Context;
use lyricsync::config::Config;
use lyricsync::source::{load_lyrics, HttpFetcher, LyricSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let selector = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => Config::load().context("Failed to load config")?.lyric_source,
    };

    let source = LyricSource::parse(&selector)?;
    let lines = load_lyrics(&source, &HttpFetcher::new())
        .await
        .with_context(|| format!("Failed to load lyrics from {selector}"))?;

    eprintln!("=== {} lines from {selector} ===", lines.len());
    println!("{}", serde_json::to_string_pretty(&lines)?);
    Ok(())
}
