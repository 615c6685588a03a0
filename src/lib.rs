//! `lyricsync` - word-level lyric synchronization.
//!
//! Normalizes TTML, LRC, YRC, LYS and QRC lyrics into one line model and
//! keeps a lyric renderer in step with a playback clock, one tick per
//! display refresh.

pub mod app;
pub mod background;
pub mod config;
pub mod constants;
pub mod error;
pub mod lyrics;
pub mod playback;
pub mod player;
pub mod source;
pub mod sync;
pub mod types;
pub mod ui;
