//! Boundary with the lyric rendering engine.

use crate::lyrics::LyricLine;
use crate::types::SpringParams;

/// A lyric rendering engine driven by the synchronization loop.
///
/// The core only forwards values through this trait; layout, animation and
/// painting belong to the implementation.
pub trait LyricRenderer {
    /// Replace the whole line set.
    fn set_lyric_lines(&mut self, lines: Vec<LyricLine>);

    /// Move the engine's time cursor to an absolute position.
    ///
    /// `is_seek` asks for an instantaneous jump with no animation through the
    /// skipped interval.
    fn set_current_time(&mut self, time_ms: u64, is_seek: bool);

    /// Advance the engine's own animations by `elapsed_ms` of wall time.
    fn update(&mut self, elapsed_ms: f64);

    /// Freeze time-driven effects while playback is paused.
    fn pause(&mut self) {}

    /// Undo [`pause`](Self::pause).
    fn resume(&mut self) {}

    /// Width of the highlight fade across a word.
    fn set_word_fade_width(&mut self, width: f64);

    /// Blur lines away from the current one.
    fn set_enable_blur(&mut self, enabled: bool);

    /// Animate line movement with springs.
    fn set_enable_spring(&mut self, enabled: bool);

    /// Horizontal line spring.
    fn set_line_pos_x_spring_params(&mut self, params: SpringParams);

    /// Vertical line spring.
    fn set_line_pos_y_spring_params(&mut self, params: SpringParams);

    /// Line scale spring.
    fn set_line_scale_spring_params(&mut self, params: SpringParams);
}
