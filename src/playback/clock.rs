//! Playback clock over a media backend or a simulated timeline.
//!
//! The clock is a small state machine (`Idle -> Playing <-> Stopped`) sampled
//! once per refresh tick by the synchronization loop. In mock mode the
//! simulated position is advanced inside [`PlaybackClock::sample`] from the
//! tick timestamp, so the simulated timeline and the loop share one scheduler
//! and never race.

use crate::constants::playback::MOCK_PLAYBACK_CEILING_MS;
use crate::error::Result;
use crate::playback::media::{floor_millis, millis_to_seconds, seconds_to_millis, MediaBackend};

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Never started.
    #[default]
    Idle,
    /// Advancing.
    Playing,
    /// Paused or finished.
    Stopped,
}

/// Position of the simulated timeline.
#[derive(Debug, Clone, Copy, Default)]
struct MockTimeline {
    /// Position at the moment playback (re)started.
    base_ms: u64,
    /// Tick timestamp matching `base_ms`; set by the first tick after a start or seek.
    anchor: Option<f64>,
}

enum ClockSource {
    Media(Box<dyn MediaBackend>),
    Mock(MockTimeline),
}

/// One consistent read of the clock, taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Position in whole milliseconds.
    pub time_ms: u64,
    /// Whether the clock was playing at the time of the read.
    pub is_playing: bool,
}

/// Time source driving lyric synchronization.
pub struct PlaybackClock {
    source: ClockSource,
    state: PlaybackState,
    current_time_ms: u64,
}

impl PlaybackClock {
    /// Clock reading a real media backend.
    pub fn media(backend: Box<dyn MediaBackend>) -> Self {
        Self {
            source: ClockSource::Media(backend),
            state: PlaybackState::Idle,
            current_time_ms: 0,
        }
    }

    /// Clock advancing a simulated timeline from tick timestamps.
    pub fn mock() -> Self {
        Self {
            source: ClockSource::Mock(MockTimeline::default()),
            state: PlaybackState::Idle,
            current_time_ms: 0,
        }
    }

    /// Current state.
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the clock is advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether this clock runs a simulated timeline.
    pub const fn is_mock(&self) -> bool {
        matches!(self.source, ClockSource::Mock(_))
    }

    /// Last sampled or seeked position in milliseconds.
    pub const fn current_time_ms(&self) -> u64 {
        self.current_time_ms
    }

    /// Length of the playable timeline, if known.
    pub fn duration_ms(&self) -> Option<u64> {
        match &self.source {
            ClockSource::Media(media) => media.duration().map(seconds_to_millis),
            ClockSource::Mock(_) => Some(MOCK_PLAYBACK_CEILING_MS),
        }
    }

    /// Start playback.
    ///
    /// A media backend is reloaded and asked to play; if it refuses, the error
    /// is returned and the state is left as it was. Simulated playback
    /// continues from the current position and is a no-op when already playing.
    pub fn play(&mut self) -> Result<()> {
        match &mut self.source {
            ClockSource::Media(media) => {
                media.load();
                media.play()?;
            }
            ClockSource::Mock(timeline) => {
                if self.state == PlaybackState::Playing {
                    return Ok(());
                }
                *timeline = MockTimeline { base_ms: self.current_time_ms, anchor: None };
            }
        }
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Toggle playback: a playing clock stops, any other clock resumes.
    ///
    /// This is a toggle, not a forced pause; two calls in a row restore the
    /// original playing state. Use [`stop`](Self::stop) to pause
    /// unconditionally.
    pub fn pause(&mut self) -> Result<()> {
        let playing = match &self.source {
            ClockSource::Media(media) => !media.paused(),
            ClockSource::Mock(_) => self.is_playing(),
        };
        if playing {
            self.stop();
            Ok(())
        } else {
            self.resume()
        }
    }

    /// Pause unconditionally.
    pub fn stop(&mut self) {
        if let ClockSource::Media(media) = &mut self.source {
            media.pause();
        }
        self.set_state(PlaybackState::Stopped);
    }

    /// Continue from the current position without reloading media.
    pub fn resume(&mut self) -> Result<()> {
        match &mut self.source {
            ClockSource::Media(media) => media.play()?,
            ClockSource::Mock(timeline) => {
                *timeline = MockTimeline { base_ms: self.current_time_ms, anchor: None };
            }
        }
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Jump to `time_ms`.
    pub fn seek(&mut self, time_ms: u64) {
        tracing::debug!("Seek {} -> {time_ms} ms", self.current_time_ms);
        self.current_time_ms = time_ms;
        match &mut self.source {
            ClockSource::Media(media) => media.set_current_time(millis_to_seconds(time_ms)),
            ClockSource::Mock(timeline) => *timeline = MockTimeline { base_ms: time_ms, anchor: None },
        }
    }

    /// Read the clock for the tick at `now_ms` (host refresh timestamp).
    ///
    /// Media clocks report the backend position and follow its paused flag.
    /// Simulated clocks advance by the wall time since the first tick after
    /// they started, stopping themselves at the playback ceiling.
    pub fn sample(&mut self, now_ms: f64) -> ClockReading {
        match &mut self.source {
            ClockSource::Media(media) => {
                self.current_time_ms = seconds_to_millis(media.current_time());
                if media.paused() && self.state == PlaybackState::Playing {
                    self.set_state(PlaybackState::Stopped);
                }
                ClockReading { time_ms: self.current_time_ms, is_playing: self.is_playing() }
            }
            ClockSource::Mock(timeline) => {
                if self.state != PlaybackState::Playing {
                    return ClockReading { time_ms: self.current_time_ms, is_playing: false };
                }

                let anchor = *timeline.anchor.get_or_insert(now_ms);
                let elapsed = floor_millis(now_ms - anchor);
                let position = timeline.base_ms.saturating_add(elapsed);
                self.current_time_ms = position.min(MOCK_PLAYBACK_CEILING_MS);

                let reading = ClockReading { time_ms: self.current_time_ms, is_playing: true };
                if position >= MOCK_PLAYBACK_CEILING_MS {
                    self.set_state(PlaybackState::Stopped);
                }
                reading
            }
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            tracing::debug!("Playback clock {:?} -> {state:?} at {} ms", self.state, self.current_time_ms);
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn mock_starts_on_first_tick() {
        let mut clock = PlaybackClock::mock();
        clock.play().unwrap();
        assert_eq!(clock.sample(5_000.0).time_ms, 0);
        assert_eq!(clock.sample(5_250.7).time_ms, 250);
    }

    #[test]
    fn mock_elapsed_is_exact_in_whole_millis() {
        let mut clock = PlaybackClock::mock();
        clock.play().unwrap();
        clock.sample(0.0);
        for ms in 1..2_000_u32 {
            assert_eq!(clock.sample(f64::from(ms)).time_ms, u64::from(ms));
        }
        assert_eq!(clock.sample(2_000.9).time_ms, 2_000);
    }

    #[test]
    fn mock_idle_does_not_advance() {
        let mut clock = PlaybackClock::mock();
        let reading = clock.sample(1_000.0);
        assert_eq!(reading, ClockReading { time_ms: 0, is_playing: false });
        assert_eq!(clock.state(), PlaybackState::Idle);
    }

    #[test]
    fn mock_stops_at_ceiling() {
        let mut clock = PlaybackClock::mock();
        clock.seek(MOCK_PLAYBACK_CEILING_MS - 10);
        clock.play().unwrap();
        clock.sample(0.0);
        let reading = clock.sample(100.0);
        assert_eq!(reading.time_ms, MOCK_PLAYBACK_CEILING_MS);
        assert!(reading.is_playing);
        assert_eq!(clock.state(), PlaybackState::Stopped);
        assert!(!clock.sample(200.0).is_playing);
    }

    #[test]
    fn mock_resume_continues_from_pause_point() {
        let mut clock = PlaybackClock::mock();
        clock.play().unwrap();
        clock.sample(0.0);
        clock.sample(1_000.0);
        clock.stop();
        clock.sample(9_000.0);
        clock.resume().unwrap();
        clock.sample(10_000.0);
        assert_eq!(clock.sample(10_500.0).time_ms, 1_500);
    }

    #[test]
    fn second_play_does_not_restart_mock() {
        let mut clock = PlaybackClock::mock();
        clock.play().unwrap();
        clock.sample(0.0);
        clock.sample(400.0);
        clock.play().unwrap();
        assert_eq!(clock.sample(800.0).time_ms, 800);
    }
}
