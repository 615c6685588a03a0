//! Shared value types passed between the configuration layer, the player and
//! the rendering interfaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::render;
use crate::error::Error;

/// Parameters for one spring axis of the line animation.
///
/// The values are only forwarded to the rendering engine; nothing in this
/// crate integrates the spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Mass of the simulated body.
    pub mass: f64,
    /// Damping (resistance) coefficient.
    pub damping: f64,
    /// Stiffness (elasticity) coefficient.
    pub stiffness: f64,
    /// Force a soft spring even when damping is below 1.
    pub soft: bool,
}

impl SpringParams {
    /// Create spring parameters with `soft` disabled.
    pub const fn new(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self { mass, damping, stiffness, soft: false }
    }
}

/// Spring parameters for the three animated line axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSprings {
    /// Horizontal displacement spring.
    pub pos_x: SpringParams,
    /// Vertical displacement spring.
    pub pos_y: SpringParams,
    /// Scale spring.
    pub scale: SpringParams,
}

impl Default for LineSprings {
    fn default() -> Self {
        Self {
            pos_x: SpringParams::new(1.0, 10.0, 100.0),
            pos_y: SpringParams::new(1.0, 15.0, 100.0),
            scale: SpringParams::new(1.0, 20.0, 100.0),
        }
    }
}

/// Settings forwarded to the lyric rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Width of the highlight fade across a word.
    pub fade_width: f64,
    /// Blur lines away from the current one.
    pub enable_blur: bool,
    /// Animate line movement with springs instead of snapping.
    pub enable_spring: bool,
    /// Per-axis spring parameters.
    pub springs: LineSprings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fade_width: render::DEFAULT_FADE_WIDTH,
            enable_blur: true,
            enable_spring: true,
            springs: LineSprings::default(),
        }
    }
}

/// Background renderer backend selected by mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundMode {
    /// Mesh-gradient renderer (`mg`).
    #[default]
    MeshGradient,
    /// Pixi renderer (`pixi`).
    Pixi,
}

impl BackgroundMode {
    /// Returns the short mode string used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MeshGradient => "mg",
            Self::Pixi => "pixi",
        }
    }
}

impl fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackgroundMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mg" => Ok(Self::MeshGradient),
            "pixi" => Ok(Self::Pixi),
            other => Err(Error::config(
                format!("Unknown renderer mode {other:?}"),
                "Use \"mg\" or \"pixi\"",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn background_mode_parses_known_modes() {
        assert_eq!("mg".parse::<BackgroundMode>().unwrap(), BackgroundMode::MeshGradient);
        assert_eq!("pixi".parse::<BackgroundMode>().unwrap(), BackgroundMode::Pixi);
    }

    #[test]
    fn background_mode_rejects_unknown() {
        match "webgl".parse::<BackgroundMode>() {
            Err(Error::Config { message, .. }) => assert!(message.contains("webgl")),
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_springs_match_line_axes() {
        let springs = LineSprings::default();
        assert!((springs.pos_y.damping - 15.0).abs() < f64::EPSILON);
        assert!((springs.scale.damping - 20.0).abs() < f64::EPSILON);
        assert!(!springs.pos_x.soft);
    }
}
