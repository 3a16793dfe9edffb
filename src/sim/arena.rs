//! Arena state
//!
//! The arena exclusively owns its bodies and pointer. Bodies added from
//! outside a tick wait in a pending queue and join the live sequence at the
//! start of the next tick.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::pointer::{InputSource, Pointer};
use crate::consts::*;
use crate::error::Result;
use crate::positive;
use crate::renderer::Frame;
use crate::settings::SandboxSettings;

/// Ticks-per-second sampler driven by host timestamps
#[derive(Debug, Clone)]
pub struct ThroughputMeter {
    window_ms: f64,
    window_start_ms: Option<f64>,
    ticks_in_window: u32,
    rate: u32,
}

impl ThroughputMeter {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            window_start_ms: None,
            ticks_in_window: 0,
            rate: 0,
        }
    }

    /// Count one tick at host time `now_ms`; publish the count once the
    /// window has elapsed
    pub fn record(&mut self, now_ms: f64) {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.ticks_in_window += 1;
        if now_ms - start >= self.window_ms {
            self.rate = self.ticks_in_window;
            self.ticks_in_window = 0;
            self.window_start_ms = Some(now_ms);
        }
    }

    /// Ticks counted during the last complete window
    pub fn rate(&self) -> u32 {
        self.rate
    }
}

/// The simulated world
#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) bounds: Vec2,
    pub(crate) gravity: Vec2,
    pub(crate) pointer: Pointer,
    /// Live bodies, sorted by priority after every tick
    pub(crate) bodies: Vec<Body>,
    /// Bodies waiting to join at the next tick
    pub(crate) pending: Vec<Body>,
    pub(crate) tick_count: u64,
    pub(crate) throughput: ThroughputMeter,
    motion_sensor: bool,
    sensor_scale: f32,
    next_id: BodyId,
}

impl Arena {
    /// Create an empty arena
    pub fn new(bounds: Vec2, gravity: Vec2) -> Result<Self> {
        check_bounds(bounds)?;
        log::info!(
            "Arena {}x{}, gravity ({}, {})",
            bounds.x,
            bounds.y,
            gravity.x,
            gravity.y
        );
        Ok(Self {
            bounds,
            gravity,
            pointer: Pointer::default(),
            bodies: Vec::new(),
            pending: Vec::new(),
            tick_count: 0,
            throughput: ThroughputMeter::new(THROUGHPUT_WINDOW_MS),
            motion_sensor: true,
            sensor_scale: SENSOR_GRAVITY_SCALE,
            next_id: 1,
        })
    }

    /// Create an arena with initial bodies queued for the first tick
    pub fn with_bodies(
        bounds: Vec2,
        gravity: Vec2,
        bodies: impl IntoIterator<Item = Body>,
    ) -> Result<Self> {
        let mut arena = Self::new(bounds, gravity)?;
        for body in bodies {
            arena.add_body(body);
        }
        Ok(arena)
    }

    /// Create an empty arena configured from settings (no bodies; see
    /// [`super::spawn::populate`])
    pub fn from_settings(settings: &SandboxSettings) -> Result<Self> {
        settings.validate()?;
        let mut arena = Self::new(settings.bounds(), settings.gravity)?;
        arena.pointer = Pointer::new(settings.max_pointer_speed);
        arena.throughput = ThroughputMeter::new(settings.throughput_window_ms);
        arena.motion_sensor = settings.motion_sensor;
        arena.sensor_scale = settings.sensor_scale;
        Ok(arena)
    }

    /// Queue a body; it joins the live sequence at the start of the next tick
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        body.id = self.next_id;
        self.next_id += 1;
        let id = body.id;
        self.pending.push(body);
        id
    }

    /// Flag a live or pending body for removal. Returns false if unknown.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        if let Some(pos) = self.pending.iter().position(|b| b.id == id) {
            self.pending.remove(pos);
            return true;
        }
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(body) => {
                body.remove();
                true
            }
            None => false,
        }
    }

    /// Live bodies in update/paint order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// The body currently following the pointer, if any
    pub fn dragging(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_dragging())
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Change the arena size. Bodies keep their positions; later ticks clamp
    /// them into the new bounds.
    pub fn resize(&mut self, bounds: Vec2) -> Result<()> {
        check_bounds(bounds)?;
        log::info!("Arena resized to {}x{}", bounds.x, bounds.y);
        self.bounds = bounds;
        Ok(())
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        if gravity != self.gravity {
            log::debug!("Gravity set to ({}, {})", gravity.x, gravity.y);
        }
        self.gravity = gravity;
    }

    pub fn reset_gravity(&mut self) {
        self.set_gravity(Vec2::ZERO);
    }

    pub fn motion_sensor_enabled(&self) -> bool {
        self.motion_sensor
    }

    pub fn set_motion_sensor(&mut self, enabled: bool) {
        self.motion_sensor = enabled;
    }

    /// Feed an accelerometer reading (including gravity). Screen y grows
    /// downward, so the y axis is flipped. Ignored while the sensor is off.
    pub fn apply_motion_sensor(&mut self, ax: f32, ay: f32) {
        if self.motion_sensor {
            self.set_gravity(Vec2::new(ax, -ay) * self.sensor_scale);
        }
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Forward a normalized input event to the pointer
    pub fn update_pointer(
        &mut self,
        x: f32,
        y: f32,
        pressed: Option<bool>,
        source: InputSource,
        timestamp_ms: f64,
    ) {
        self.pointer.update(x, y, pressed, source, timestamp_ms);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn updates_per_second(&self) -> u32 {
        self.throughput.rate()
    }

    /// Draw descriptors for the current live sequence
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick_count,
            gravity: self.gravity,
            updates_per_second: self.throughput.rate(),
            commands: self
                .bodies
                .iter()
                .map(|b| b.draw_command(self.gravity))
                .collect(),
        }
    }
}

fn check_bounds(bounds: Vec2) -> Result<()> {
    positive("arena width", bounds.x)?;
    positive("arena height", bounds.y)?;
    Ok(())
}
