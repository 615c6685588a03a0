//! Terminal host state: owns the player and handles input and async loads.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::{async_tasks::CHANNEL_BUFFER_SIZE, playback::SEEK_STEP_MS};
use crate::error::Result;
use crate::lyrics::LyricLine;
use crate::playback::PlaybackClock;
use crate::player::Player;
use crate::source::{load_lyrics, HttpFetcher, LyricSource};
use crate::ui::{backdrop_factory, SharedBackdrop, TerminalLyricView};

/// Messages sent back from async tasks.
#[derive(Debug)]
pub enum AppUpdate {
    /// A lyric load finished.
    LyricsLoaded {
        /// Load request this result answers.
        generation: u64,
        /// Loaded lines or the failure.
        result: Result<Vec<LyricLine>>,
    },
}

/// Application state for the terminal host.
pub struct App {
    player: Player<TerminalLyricView>,
    backdrop: SharedBackdrop,
    config: Config,
    fetcher: HttpFetcher,
    async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    /// Incremented per load request; older results are discarded.
    load_generation: u64,
    started: Instant,
    should_quit: bool,
    /// A lyric load is in flight.
    pub is_loading: bool,
    /// Last error to show in the status bar.
    pub error_message: Option<String>,
}

impl App {
    /// Build the player from configuration.
    ///
    /// The terminal has no audio output, so playback always runs on the
    /// simulated clock.
    pub fn new(config: Config) -> Self {
        if let Some(music) = &config.music_source {
            tracing::info!("No audio output in the terminal host; {music} will not be played");
        }

        let backdrop = SharedBackdrop::default();
        let mut player = Player::new(
            PlaybackClock::mock(),
            TerminalLyricView::new(),
            backdrop_factory(&backdrop),
        );
        player.apply_settings(&config.render);
        player.set_background_settings(config.background.clone());
        if let Some(album) = &config.album_source {
            player.set_album(album.clone());
        }
        player.recreate_background(config.background.mode);

        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            player,
            backdrop,
            config,
            fetcher: HttpFetcher::new(),
            async_task_tx,
            async_task_rx,
            load_generation: 0,
            started: Instant::now(),
            should_quit: false,
            is_loading: false,
            error_message: None,
        }
    }

    /// The player.
    pub const fn player(&self) -> &Player<TerminalLyricView> {
        &self.player
    }

    /// Shared state of the current backdrop.
    pub const fn backdrop(&self) -> &SharedBackdrop {
        &self.backdrop
    }

    /// Seconds since the host started.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Whether the user asked to quit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start loading the configured lyric source in the background.
    ///
    /// The frame loop keeps ticking with the current lines until the result
    /// arrives through [`handle_updates`](Self::handle_updates). Starting a
    /// new load supersedes any load still in flight.
    pub fn load_lyrics(&mut self) {
        let source = match LyricSource::parse(&self.config.lyric_source) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Not loading lyrics: {e}");
                self.error_message = Some(e.to_string());
                return;
            }
        };

        self.load_generation += 1;
        let generation = self.load_generation;
        self.is_loading = true;
        let tx = self.async_task_tx.clone();
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move {
            let result = load_lyrics(&source, &fetcher).await;
            let _ = tx.send(AppUpdate::LyricsLoaded { generation, result }).await;
        });
    }

    /// Apply finished async work.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.async_task_rx.try_recv() {
            let AppUpdate::LyricsLoaded { generation, result } = update;
            if generation != self.load_generation {
                tracing::debug!("Discarding lyric load {generation}, superseded by {}", self.load_generation);
                continue;
            }
            match result {
                Ok(lines) => {
                    self.is_loading = false;
                    self.error_message = None;
                    self.player.set_lyric_lines(lines);
                }
                Err(e) => {
                    self.is_loading = false;
                    tracing::warn!("Lyric load failed, keeping current lines: {e}");
                    self.error_message = Some(format!("Failed to load lyrics: {e}"));
                }
            }
        }
    }

    /// Run one refresh tick of the player.
    pub fn tick(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        self.player.tick(now_ms);
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let result = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Esc => {
                if self.error_message.take().is_none() {
                    self.should_quit = true;
                }
                Ok(())
            }
            KeyCode::Char(' ') => self.player.pause(),
            KeyCode::Char('p') => self.player.play(),
            KeyCode::Char('r') => {
                self.load_lyrics();
                Ok(())
            }
            KeyCode::Left => {
                let now = self.player.clock().current_time_ms();
                self.player.seek(now.saturating_sub(SEEK_STEP_MS));
                Ok(())
            }
            KeyCode::Right => {
                let now = self.player.clock().current_time_ms();
                let limit = self.player.clock().duration_ms().unwrap_or(u64::MAX);
                self.player.seek(now.saturating_add(SEEK_STEP_MS).min(limit));
                Ok(())
            }
            KeyCode::Up => {
                if let Some(index) = self.player.current_line_index() {
                    self.player.seek_to_line(index.saturating_sub(1));
                }
                Ok(())
            }
            KeyCode::Down => {
                let next = self.player.current_line_index().map_or(0, |i| i + 1);
                self.player.seek_to_line(next);
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            self.error_message = Some(e.to_string());
        }
    }
}
