//! Media backend boundary.

use crate::error::Result;

/// An audio element the clock can drive and read.
///
/// Times are in seconds with sub-millisecond precision, as media APIs report
/// them; the clock converts to whole milliseconds.
pub trait MediaBackend {
    /// (Re)load the current media source.
    fn load(&mut self);

    /// Start or continue playback. The host may refuse.
    fn play(&mut self) -> Result<()>;

    /// Pause playback.
    fn pause(&mut self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position, in seconds.
    fn set_current_time(&mut self, seconds: f64);

    /// Whether playback is paused (also true before the first play and after the end).
    fn paused(&self) -> bool;

    /// Media length in seconds, if known.
    fn duration(&self) -> Option<f64>;
}

/// Convert a media time in seconds to whole milliseconds.
///
/// The fractional millisecond is truncated, never rounded. Negative and
/// non-finite inputs read as zero.
pub fn seconds_to_millis(seconds: f64) -> u64 {
    floor_millis(seconds * 1000.0)
}

/// Truncate a fractional millisecond value to whole milliseconds.
///
/// Negative and non-finite inputs read as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn floor_millis(millis: f64) -> u64 {
    if !millis.is_finite() || millis <= 0.0 {
        return 0;
    }
    millis.floor() as u64
}

/// Convert whole milliseconds to media seconds.
#[allow(clippy::cast_precision_loss)]
pub fn millis_to_seconds(millis: u64) -> f64 {
    millis as f64 / 1000.0
}
