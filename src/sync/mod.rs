//! Per-refresh synchronization between the playback clock and the renderer.

pub mod renderer;

pub use renderer::LyricRenderer;

use crate::playback::{ClockReading, PlaybackClock};

/// What one tick forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// The clock read taken at the start of the tick.
    pub reading: ClockReading,
    /// Wall time passed to [`LyricRenderer::update`].
    pub elapsed_ms: f64,
}

/// Runs once per display refresh.
///
/// There is no stop condition: the loop ends when the host stops calling
/// [`tick`](Self::tick).
#[derive(Debug, Default)]
pub struct SyncLoop {
    last_timestamp: Option<f64>,
}

impl SyncLoop {
    /// Create a loop that has not ticked yet.
    pub const fn new() -> Self {
        Self { last_timestamp: None }
    }

    /// Reconcile `clock` and `renderer` for the refresh at `timestamp_ms`.
    ///
    /// The clock is read once; while it plays the absolute time is forwarded
    /// before the elapsed-time advance. The first tick advances by zero, and a
    /// host timestamp that runs backwards advances by zero as well.
    pub fn tick<R>(&mut self, timestamp_ms: f64, clock: &mut PlaybackClock, renderer: &mut R) -> TickReport
    where
        R: LyricRenderer + ?Sized,
    {
        let elapsed_ms = self
            .last_timestamp
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_timestamp = Some(timestamp_ms);

        let reading = clock.sample(timestamp_ms);
        if reading.is_playing {
            renderer.set_current_time(reading.time_ms, false);
        }
        renderer.update(elapsed_ms);

        TickReport { reading, elapsed_ms }
    }

    /// Whether at least one tick has run.
    pub const fn has_ticked(&self) -> bool {
        self.last_timestamp.is_some()
    }
}
