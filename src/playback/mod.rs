//! Playback time sources.

pub mod clock;
pub mod media;

pub use clock::{ClockReading, PlaybackClock, PlaybackState};
pub use media::MediaBackend;
