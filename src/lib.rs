//! Ball Sandbox - a 2D rigid-ball physics sandbox
//!
//! Core modules:
//! - `sim`: Simulation engine (bodies, collisions, pointer, arena tick)
//! - `renderer`: Draw descriptors handed to an external renderer
//! - `settings`: Data-driven sandbox configuration
//! - `error`: Crate error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Result, SandboxError};
pub use settings::SandboxSettings;

/// Sandbox configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Decimal places kept when quantizing position and velocity each tick
    pub const QUANTIZE_DECIMALS: u32 = 1;

    /// Ball defaults
    pub const BALL_ELASTICITY: f32 = 0.95;
    pub const BALL_DENSITY: f32 = 1.0;
    pub const BALL_PRIORITY: i32 = 10;
    /// Random launch speed range used when spawning balls
    pub const BALL_SPAWN_SPEED: f32 = 20.0;

    /// Gravity control widget
    pub const CONTROL_PRIORITY: i32 = -1;
    pub const CONTROL_SIZE: f32 = 100.0;
    pub const CONTROL_POSITION: f32 = 20.0;
    /// Pixels of handle offset per unit of gravity
    pub const CONTROL_GRAVITY_SCALE: f32 = 50.0;

    /// Pointer velocity cap per axis (units per millisecond)
    pub const MAX_POINTER_SPEED: f32 = 1.0;

    /// Accelerometer reading to gravity conversion
    pub const SENSOR_GRAVITY_SCALE: f32 = 0.1;

    /// Host tick rate the headless driver simulates
    pub const TICK_HZ: u32 = 60;
    pub const FRAME_MS: f64 = 1000.0 / TICK_HZ as f64;

    /// Wall-clock window for the updates-per-second sample (ms)
    pub const THROUGHPUT_WINDOW_MS: f64 = 1000.0;
}

/// Round a value to `decimals` decimal places
#[inline]
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Check that a physical parameter is finite and strictly positive
#[inline]
pub fn positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SandboxError::InvalidParameter {
            name,
            value,
            expected: "a finite value > 0",
        })
    }
}
