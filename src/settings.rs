//! Sandbox settings
//!
//! Loaded from a JSON file. Every field has a default, so a file only needs
//! the keys it wants to override.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SandboxError};
use crate::positive;

/// Sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxSettings {
    // === Arena ===
    pub width: f32,
    pub height: f32,
    /// Initial gravity (added to velocity each tick)
    pub gravity: Vec2,
    /// Seed for ball placement and colors
    pub seed: u64,

    // === Population ===
    pub small_balls: usize,
    pub small_radius: [f32; 2],
    pub large_balls: usize,
    pub large_radius: [f32; 2],
    pub elasticity: f32,
    pub density: f32,
    pub ball_priority: i32,

    // === Gravity control ===
    /// Spawn the draggable gravity widget
    pub gravity_control: bool,
    pub control_position: Vec2,
    pub control_size: Vec2,

    // === Input ===
    /// Let accelerometer readings drive gravity
    pub motion_sensor: bool,
    pub sensor_scale: f32,
    /// Pointer velocity cap per axis (units/ms)
    pub max_pointer_speed: f32,

    // === Diagnostics ===
    pub throughput_window_ms: f64,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            gravity: Vec2::ZERO,
            seed: 0x5eed,

            small_balls: 200,
            small_radius: [5.0, 20.0],
            large_balls: 10,
            large_radius: [20.0, 60.0],
            elasticity: BALL_ELASTICITY,
            density: BALL_DENSITY,
            ball_priority: BALL_PRIORITY,

            gravity_control: true,
            control_position: Vec2::splat(CONTROL_POSITION),
            control_size: Vec2::splat(CONTROL_SIZE),

            motion_sensor: true,
            sensor_scale: SENSOR_GRAVITY_SCALE,
            max_pointer_speed: MAX_POINTER_SPEED,

            throughput_window_ms: THROUGHPUT_WINDOW_MS,
        }
    }
}

impl SandboxSettings {
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    /// Reject values the engine can't simulate
    pub fn validate(&self) -> Result<()> {
        positive("arena width", self.width)?;
        positive("arena height", self.height)?;
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", f32::NAN, "finite components"));
        }
        check_radius_range("small_radius", self.small_radius)?;
        check_radius_range("large_radius", self.large_radius)?;
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(invalid("elasticity", self.elasticity, "a value in [0, 1]"));
        }
        positive("density", self.density)?;
        if self.gravity_control {
            positive("control width", self.control_size.x)?;
            positive("control height", self.control_size.y)?;
        }
        if !self.sensor_scale.is_finite() {
            return Err(invalid("sensor_scale", self.sensor_scale, "a finite value"));
        }
        positive("max_pointer_speed", self.max_pointer_speed)?;
        positive("throughput_window_ms", self.throughput_window_ms as f32)?;
        Ok(())
    }
}

fn check_radius_range(name: &'static str, [min, max]: [f32; 2]) -> Result<()> {
    positive(name, min)?;
    positive(name, max)?;
    if min > max {
        return Err(invalid(name, min, "min <= max"));
    }
    Ok(())
}

fn invalid(name: &'static str, value: f32, expected: &'static str) -> SandboxError {
    SandboxError::InvalidParameter {
        name,
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SandboxSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bounds(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            SandboxSettings::from_json(r#"{ "width": 1024, "gravity": [0.0, 0.5] }"#).unwrap();
        assert_eq!(settings.width, 1024.0);
        assert_eq!(settings.height, ARENA_HEIGHT);
        assert_eq!(settings.gravity, Vec2::new(0.0, 0.5));
        assert_eq!(settings.small_balls, 200);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SandboxSettings::from_json(r#"{ "density": 0 }"#).is_err());
        assert!(SandboxSettings::from_json(r#"{ "elasticity": 1.5 }"#).is_err());
        assert!(SandboxSettings::from_json(r#"{ "small_radius": [10, 5] }"#).is_err());
        assert!(SandboxSettings::from_json(r#"{ "width": -1 }"#).is_err());
        assert!(matches!(
            SandboxSettings::from_json("not json"),
            Err(SandboxError::Settings(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = SandboxSettings {
            seed: 42,
            motion_sensor: false,
            ..Default::default()
        };
        let back = SandboxSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.seed, 42);
        assert!(!back.motion_sensor);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = SandboxSettings::load_or_default("/nonexistent/sandbox.json");
        assert_eq!(settings.seed, SandboxSettings::default().seed);
    }
}
