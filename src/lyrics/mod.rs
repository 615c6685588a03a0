//! Lyric parsing and normalization.
//!
//! Five source formats are parsed into [`raw`] lines and then normalized
//! into the shared [`LyricLine`] schema consumed by renderers.

pub mod demo;
pub mod format;
pub mod lrc;
pub mod lys;
pub mod model;
pub mod normalize;
pub mod qrc;
pub mod raw;
mod syllable;
pub mod ttml;
pub mod yrc;

pub use format::LyricFormat;
pub use model::{LyricLine, Word};
pub use normalize::normalize;
