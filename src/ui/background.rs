//! Terminal background renderer: a tinted backdrop behind the lyrics.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::style::Color;

use crate::background::{BackgroundFactory, BackgroundRenderer};
use crate::constants::render;
use crate::types::BackgroundMode;

/// Palettes cycled by the flowing (non-static) backdrop.
const MESH_PALETTE: [Color; 4] = [
    Color::Rgb(24, 18, 40),
    Color::Rgb(36, 20, 52),
    Color::Rgb(20, 28, 56),
    Color::Rgb(30, 24, 48),
];
const PIXI_PALETTE: [Color; 4] = [
    Color::Rgb(12, 28, 30),
    Color::Rgb(16, 36, 34),
    Color::Rgb(10, 30, 40),
    Color::Rgb(18, 32, 28),
];

/// State shared between a backdrop instance and the drawing code.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropState {
    /// Renderer mode.
    pub mode: BackgroundMode,
    /// Frame rate requested by the player.
    pub fps: u32,
    /// Resolution ratio.
    pub scale: f64,
    /// Still frame instead of flowing colours.
    pub static_mode: bool,
    /// Flow speed in palette steps per second.
    pub flow_speed: f64,
    /// Album art source.
    pub album: Option<String>,
    /// Animation paused.
    pub paused: bool,
    /// Instance has been disposed.
    pub disposed: bool,
}

impl BackdropState {
    fn new(mode: BackgroundMode) -> Self {
        Self {
            mode,
            fps: render::DEFAULT_BACKGROUND_FPS,
            scale: render::DEFAULT_BACKGROUND_SCALE,
            static_mode: true,
            flow_speed: render::DEFAULT_BACKGROUND_FLOW_SPEED,
            album: None,
            paused: false,
            disposed: false,
        }
    }

    /// Colour to paint at `elapsed_secs` since the host started.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color(&self, elapsed_secs: f64) -> Color {
        let palette = match self.mode {
            BackgroundMode::MeshGradient => &MESH_PALETTE,
            BackgroundMode::Pixi => &PIXI_PALETTE,
        };
        // The album picks the starting colour so different covers look different.
        let seed = self.album.as_deref().map_or(0, |a| a.bytes().map(usize::from).sum::<usize>());
        let step = if self.static_mode || self.paused {
            0
        } else {
            (elapsed_secs * self.flow_speed.max(0.0) / 4.0) as usize
        };
        palette[(seed + step) % palette.len()]
    }
}

/// Handle to the backdrop most recently created by [`backdrop_factory`].
pub type SharedBackdrop = Rc<RefCell<Option<BackdropState>>>;

/// [`BackgroundRenderer`] writing its settings into a shared backdrop state.
#[derive(Debug)]
pub struct TerminalBackground {
    state: SharedBackdrop,
}

impl TerminalBackground {
    fn with_state<F: FnOnce(&mut BackdropState)>(&self, f: F) {
        if let Some(state) = self.state.borrow_mut().as_mut() {
            f(state);
        }
    }
}

impl BackgroundRenderer for TerminalBackground {
    fn mode(&self) -> BackgroundMode {
        self.state.borrow().as_ref().map_or_else(BackgroundMode::default, |s| s.mode)
    }

    fn dispose(&mut self) {
        self.with_state(|s| s.disposed = true);
    }

    fn set_fps(&mut self, fps: u32) {
        self.with_state(|s| s.fps = fps);
    }

    fn set_render_scale(&mut self, scale: f64) {
        self.with_state(|s| s.scale = scale);
    }

    fn set_static_mode(&mut self, enabled: bool) {
        self.with_state(|s| s.static_mode = enabled);
    }

    fn set_flow_speed(&mut self, speed: f64) {
        self.with_state(|s| s.flow_speed = speed);
    }

    fn set_album(&mut self, source: &str) {
        self.with_state(|s| s.album = Some(source.to_string()));
    }

    fn pause(&mut self) {
        self.with_state(|s| s.paused = true);
    }

    fn resume(&mut self) {
        self.with_state(|s| s.paused = false);
    }
}

/// Factory creating terminal backdrops that all publish into `shared`.
///
/// Creating a new backdrop replaces the shared state, so the drawing code
/// always sees the latest instance.
pub fn backdrop_factory(shared: &SharedBackdrop) -> BackgroundFactory {
    let shared = Rc::clone(shared);
    Box::new(move |mode| {
        *shared.borrow_mut() = Some(BackdropState::new(mode));
        Box::new(TerminalBackground { state: Rc::clone(&shared) })
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn factory_publishes_latest_instance() {
        let shared = SharedBackdrop::default();
        let factory = backdrop_factory(&shared);
        let mut bg = factory(BackgroundMode::Pixi);
        bg.set_fps(24);
        assert_eq!(bg.mode(), BackgroundMode::Pixi);
        assert_eq!(shared.borrow().as_ref().unwrap().fps, 24);

        let _next = factory(BackgroundMode::MeshGradient);
        assert_eq!(shared.borrow().as_ref().unwrap().mode, BackgroundMode::MeshGradient);
    }

    #[test]
    fn static_mode_holds_colour() {
        let state = BackdropState::new(BackgroundMode::MeshGradient);
        assert_eq!(state.color(0.0), state.color(100.0));
    }

    #[test]
    fn flowing_mode_cycles_colour() {
        let mut state = BackdropState::new(BackgroundMode::MeshGradient);
        state.static_mode = false;
        assert_ne!(state.color(0.0), state.color(2.0));
    }
}
