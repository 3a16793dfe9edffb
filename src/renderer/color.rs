//! Colors for sandbox elements

use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGBA color with channels in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Fixed colors for non-ball elements and highlight states
pub mod colors {
    use super::Color;

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Tint for a ball that resolved a collision this tick
    pub const COLLISION: Color = Color::rgba(1.0, 0.0, 0.0, 0.5);
    pub const CONTROL: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const CONTROL_HOVER: Color = Color::rgb(0.0, 0.0, 1.0);
}

/// Alpha applied to a ball's base color while dragged
pub const DRAG_ALPHA: f32 = 0.6;
/// Alpha applied to a ball's base color while hovered
pub const HOVER_ALPHA: f32 = 0.8;

/// Lowest channel value for random ball colors (out of 255)
const RANDOM_CHANNEL_MIN: u8 = 60;

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same color, different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Random opaque color with every channel in 60..=255
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut channel = || rng.random_range(RANDOM_CHANNEL_MIN..=u8::MAX) as f32 / 255.0;
        Self::rgb(channel(), channel(), channel())
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string, for canvas-based renderers
    pub fn to_css(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{})",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            self.a
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        colors::WHITE
    }
}
