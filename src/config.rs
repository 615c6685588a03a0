//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::str::FromStr;

use crate::constants::{render, source};
use crate::error::Result;
use crate::types::{BackgroundMode, RenderSettings};

/// Background renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSettings {
    /// Renderer backend.
    pub mode: BackgroundMode,
    /// Target frame rate; also the host's refresh rate.
    pub fps: u32,
    /// Resolution ratio.
    pub scale: f64,
    /// Flow animation speed.
    pub flow_speed: f64,
    /// Render a still frame.
    pub static_mode: bool,
    /// Whether the background animates at start.
    pub playing: bool,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::default(),
            fps: render::DEFAULT_BACKGROUND_FPS,
            scale: render::DEFAULT_BACKGROUND_SCALE,
            flow_speed: render::DEFAULT_BACKGROUND_FLOW_SPEED,
            static_mode: true,
            playing: true,
        }
    }
}

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lyric source: a path, URL or the demo sentinel
    pub lyric_source: String,
    /// Music source handed to a media backend, if any
    pub music_source: Option<String>,
    /// Album art handed to the background renderer, if any
    pub album_source: Option<String>,
    /// Background renderer settings
    pub background: BackgroundSettings,
    /// Lyric renderer settings
    pub render: RenderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lyric_source: source::DEMO_SENTINEL.to_string(),
            music_source: None,
            album_source: None,
            background: BackgroundSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Values that fail to parse keep their default and log a warning; an
    /// unknown background mode is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(src) = lookup("LYRIC_SOURCE") {
            config.lyric_source = src;
        }
        config.music_source = lookup("MUSIC_SOURCE").map(|s| expand(&s));
        config.album_source = lookup("ALBUM_SOURCE").map(|s| expand(&s));

        if let Some(mode) = lookup("BG_MODE") {
            config.background.mode = mode.parse()?;
        }
        parse_into(&lookup, "BG_FPS", &mut config.background.fps);
        parse_into(&lookup, "BG_SCALE", &mut config.background.scale);
        parse_into(&lookup, "BG_FLOW_SPEED", &mut config.background.flow_speed);
        parse_into(&lookup, "BG_STATIC", &mut config.background.static_mode);
        parse_into(&lookup, "BG_PLAYING", &mut config.background.playing);
        config.background.fps = config.background.fps.clamp(1, 60);
        config.background.scale = config.background.scale.clamp(0.01, 1.0);

        parse_into(&lookup, "FADE_WIDTH", &mut config.render.fade_width);
        parse_into(&lookup, "ENABLE_BLUR", &mut config.render.enable_blur);
        parse_into(&lookup, "ENABLE_SPRING", &mut config.render.enable_spring);

        Ok(config)
    }
}

/// Expand a leading `~` in a local path; URLs pass through untouched.
fn expand(value: &str) -> String {
    shellexpand::tilde(value).to_string()
}

fn parse_into<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *slot = value,
            Err(_) => tracing::warn!("Ignoring {key}={raw:?}: not a valid value"),
        }
    }
}
