//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Playback clock constants.
pub mod playback {
    /// Simulated playback stops itself once it reaches this position (300 s).
    pub const MOCK_PLAYBACK_CEILING_MS: u64 = 300_000;

    /// Step used by the terminal host for relative seeks.
    pub const SEEK_STEP_MS: u64 = 5_000;
}

/// Lyric source constants.
pub mod source {
    /// Source string that selects the built-in demo document instead of a file.
    pub const DEMO_SENTINEL: &str = "bug";

    /// Timeout applied to remote lyric fetches, in seconds.
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
}

/// Renderer configuration defaults.
pub mod render {
    /// Default word fade width, in em units of the rendering engine.
    pub const DEFAULT_FADE_WIDTH: f64 = 0.5;

    /// Default background frame rate; also the terminal host's tick rate.
    pub const DEFAULT_BACKGROUND_FPS: u32 = 60;

    /// Default background render scale.
    pub const DEFAULT_BACKGROUND_SCALE: f64 = 1.0;

    /// Default background flow speed.
    pub const DEFAULT_BACKGROUND_FLOW_SPEED: f64 = 2.0;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// Terminal UI constants.
pub mod ui {
    /// Lines shown above the current line in the lyric view.
    pub const CONTEXT_LINES_ABOVE: usize = 3;
}
