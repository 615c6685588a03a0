//! Composition point owning the clock, the renderers and the sync loop.
//!
//! Everything the player drives is injected at construction and reached only
//! through it; there is no ambient global state.

use crate::background::{BackgroundFactory, BackgroundRenderer};
use crate::config::BackgroundSettings;
use crate::error::Result;
use crate::lyrics::LyricLine;
use crate::playback::PlaybackClock;
use crate::source::{load_lyrics, LyricSource, TextFetcher};
use crate::sync::{LyricRenderer, SyncLoop, TickReport};
use crate::types::{BackgroundMode, RenderSettings};

/// Lyric player: playback clock, lyric renderer and background, kept in sync.
pub struct Player<R: LyricRenderer> {
    clock: PlaybackClock,
    renderer: R,
    sync: SyncLoop,
    background: Option<Box<dyn BackgroundRenderer>>,
    background_factory: BackgroundFactory,
    background_settings: BackgroundSettings,
    album: Option<String>,
    line_starts: Vec<u64>,
}

impl<R: LyricRenderer> Player<R> {
    /// Create a player. The renderer starts paused until playback begins.
    pub fn new(clock: PlaybackClock, mut renderer: R, background_factory: BackgroundFactory) -> Self {
        renderer.pause();
        Self {
            clock,
            renderer,
            sync: SyncLoop::new(),
            background: None,
            background_factory,
            background_settings: BackgroundSettings::default(),
            album: None,
            line_starts: Vec::new(),
        }
    }

    /// The playback clock.
    pub const fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// The lyric renderer.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the lyric renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The current background renderer, if one has been created.
    pub fn background(&self) -> Option<&dyn BackgroundRenderer> {
        self.background.as_deref()
    }

    /// Number of lines in the current line set.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Replace the line set wholesale.
    pub fn set_lyric_lines(&mut self, lines: Vec<LyricLine>) {
        self.line_starts = lines.iter().map(|l| l.start_time).collect();
        self.renderer.set_lyric_lines(lines);
    }

    /// Load `source` and replace the line set.
    ///
    /// On failure the current lines stay in place and the error is returned.
    pub async fn reload(&mut self, source: &LyricSource, fetcher: &dyn TextFetcher) -> Result<usize> {
        match load_lyrics(source, fetcher).await {
            Ok(lines) => {
                let count = lines.len();
                self.set_lyric_lines(lines);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Keeping current lyrics, reload of {source:?} failed: {e}");
                Err(e)
            }
        }
    }

    /// Forward renderer settings.
    pub fn apply_settings(&mut self, settings: &RenderSettings) {
        self.renderer.set_word_fade_width(settings.fade_width);
        self.renderer.set_enable_blur(settings.enable_blur);
        self.renderer.set_enable_spring(settings.enable_spring);
        self.renderer.set_line_pos_x_spring_params(settings.springs.pos_x);
        self.renderer.set_line_pos_y_spring_params(settings.springs.pos_y);
        self.renderer.set_line_scale_spring_params(settings.springs.scale);
    }

    /// Dispose the current background and create a new one for `mode`.
    pub fn recreate_background(&mut self, mode: BackgroundMode) {
        if let Some(mut old) = self.background.take() {
            old.dispose();
        }
        let mut bg = (self.background_factory)(mode);
        configure_background(bg.as_mut(), &self.background_settings, self.album.as_deref());
        self.background = Some(bg);
    }

    /// Store background settings and forward them to the current background.
    pub fn set_background_settings(&mut self, settings: BackgroundSettings) {
        if let Some(bg) = self.background.as_deref_mut() {
            configure_background(bg, &settings, self.album.as_deref());
        }
        self.background_settings = settings;
    }

    /// Set the album art used by the background.
    pub fn set_album(&mut self, album: impl Into<String>) {
        let album = album.into();
        if let Some(bg) = self.background.as_deref_mut() {
            bg.set_album(&album);
        }
        self.album = Some(album);
    }

    /// Start playback and let the renderer animate.
    pub fn play(&mut self) -> Result<()> {
        if let Err(e) = self.clock.play() {
            tracing::warn!("Playback rejected: {e}");
            return Err(e);
        }
        self.renderer.resume();
        Ok(())
    }

    /// Toggle playback, pausing or resuming the renderer to match.
    ///
    /// Like [`PlaybackClock::pause`] this is a toggle.
    pub fn pause(&mut self) -> Result<()> {
        self.clock.pause()?;
        if self.clock.is_playing() {
            self.renderer.resume();
        } else {
            self.renderer.pause();
        }
        Ok(())
    }

    /// Pause unconditionally.
    pub fn stop(&mut self) {
        self.clock.stop();
        self.renderer.pause();
    }

    /// Jump to `time_ms`; the renderer jumps without animating.
    pub fn seek(&mut self, time_ms: u64) {
        self.clock.seek(time_ms);
        self.renderer.set_current_time(time_ms, true);
    }

    /// Seek to the start of line `index`, returning the new position.
    pub fn seek_to_line(&mut self, index: usize) -> Option<u64> {
        let start = *self.line_starts.get(index)?;
        self.seek(start);
        Some(start)
    }

    /// Index of the last line starting at or before the current position.
    pub fn current_line_index(&self) -> Option<usize> {
        let now = self.clock.current_time_ms();
        self.line_starts.iter().rposition(|&start| start <= now)
    }

    /// Run one refresh tick.
    pub fn tick(&mut self, timestamp_ms: f64) -> TickReport {
        self.sync.tick(timestamp_ms, &mut self.clock, &mut self.renderer)
    }
}

fn configure_background(bg: &mut dyn BackgroundRenderer, settings: &BackgroundSettings, album: Option<&str>) {
    bg.set_fps(settings.fps);
    bg.set_render_scale(settings.scale);
    bg.set_static_mode(settings.static_mode);
    bg.set_flow_speed(settings.flow_speed);
    if let Some(album) = album {
        bg.set_album(album);
    }
    if settings.playing {
        bg.resume();
    } else {
        bg.pause();
    }
}
