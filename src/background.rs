//! Boundary with the background visual renderer.
//!
//! The background is independent of lyric timing; the player only creates it
//! by mode and forwards settings.

use crate::types::BackgroundMode;

/// A background renderer instance.
pub trait BackgroundRenderer {
    /// Mode this instance was created for.
    fn mode(&self) -> BackgroundMode;

    /// Release resources; the instance is not used afterwards.
    fn dispose(&mut self);

    /// Target frame rate.
    fn set_fps(&mut self, fps: u32);

    /// Resolution ratio, 0.0 to 1.0.
    fn set_render_scale(&mut self, scale: f64);

    /// Render a still frame instead of animating.
    fn set_static_mode(&mut self, enabled: bool);

    /// Speed of the flowing animation.
    fn set_flow_speed(&mut self, speed: f64);

    /// Album art source used for the colours.
    fn set_album(&mut self, source: &str);

    /// Stop animating.
    fn pause(&mut self);

    /// Continue animating.
    fn resume(&mut self);
}

/// Creates a background renderer for a mode.
pub type BackgroundFactory = Box<dyn Fn(BackgroundMode) -> Box<dyn BackgroundRenderer>>;
