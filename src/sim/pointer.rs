//! Normalized pointer state
//!
//! The host's input bridge turns mouse/touch events into `update` calls. The
//! velocity estimate is what a released body is thrown with.

use glam::Vec2;

use crate::consts::MAX_POINTER_SPEED;

/// Where an update came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Mouse, touch, or pen; updates the velocity estimate
    #[default]
    Pointer,
    /// Synthetic or sensor-driven; moves the pointer but keeps its velocity
    Ambient,
}

/// Pointer position, velocity estimate and button state
#[derive(Debug, Clone)]
pub struct Pointer {
    pub position: Vec2,
    /// Units per millisecond, each axis clamped to `max_speed`
    pub velocity: Vec2,
    pub pressed: bool,
    last_sample_ms: Option<f64>,
    max_speed: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new(MAX_POINTER_SPEED)
    }
}

impl Pointer {
    pub fn new(max_speed: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            pressed: false,
            last_sample_ms: None,
            max_speed: max_speed.abs(),
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn last_sample_ms(&self) -> Option<f64> {
        self.last_sample_ms
    }

    /// Record a new sample. `pressed: None` leaves the button state alone.
    ///
    /// Velocity is `(new - old) / Δt` for pointer sources with a positive
    /// time step; a zero or negative step (duplicate timestamps, clock
    /// skew) keeps the previous estimate.
    pub fn update(
        &mut self,
        x: f32,
        y: f32,
        pressed: Option<bool>,
        source: InputSource,
        timestamp_ms: f64,
    ) {
        let position = Vec2::new(x, y);

        if source == InputSource::Pointer {
            if let Some(last) = self.last_sample_ms {
                let dt = (timestamp_ms - last) as f32;
                if dt > 0.0 {
                    let limit = Vec2::splat(self.max_speed);
                    self.velocity = ((position - self.position) / dt).clamp(-limit, limit);
                }
            }
        }

        self.position = position;
        self.last_sample_ms = Some(timestamp_ms);
        if let Some(pressed) = pressed {
            self.pressed = pressed;
        }
    }
}
