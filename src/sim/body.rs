//! Bodies and their per-tick update contract
//!
//! A body is a movable object in the arena. Kinds are a closed set
//! ([`BodyKind`]): physical balls, and the gravity control widget that
//! shares the same hover/drag protocol but never moves on its own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::vector::VectorExt;
use crate::consts::*;
use crate::error::{Result, SandboxError};
use crate::positive;
use crate::renderer::color::{DRAG_ALPHA, HOVER_ALPHA, colors};
use crate::renderer::{Color, DrawCommand, Shape, VisualState};

/// Opaque body identity, unique within an arena
pub type BodyId = u32;

/// Body variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Circular rigid body: gravity, collisions, walls
    Ball,
    /// Rectangular widget; dragging inside it sets arena gravity
    GravityControl,
}

/// Arena state a body may read during its update
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub bounds: Vec2,
    pub gravity: Vec2,
}

/// Side effect of a drag move that the arena must apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    None,
    SetGravity(Vec2),
}

/// A simulated object
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    pub kind: BodyKind,
    /// Bounding box size (diameter on both axes for balls)
    pub size: Vec2,
    /// Top-left corner of the bounding box
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    /// Lower updates and paints first
    pub priority: i32,
    pub color: Color,
    pub hovered: bool,
    /// Set when this body took part in a resolved collision this tick
    pub colliding: bool,
    elasticity: f32,
    density: f32,
    dragging: bool,
    /// Pointer-to-position offset captured at drag start
    drag_anchor: Vec2,
    removed: bool,
}

impl Body {
    /// Create a ball at the origin, at rest
    pub fn ball(radius: f32, elasticity: f32, density: f32) -> Result<Self> {
        let radius = positive("radius", radius)?;
        let density = positive("density", density)?;
        let elasticity = check_elasticity(elasticity)?;

        Ok(Self {
            id: 0,
            kind: BodyKind::Ball,
            size: Vec2::splat(radius * 2.0),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            priority: BALL_PRIORITY,
            color: Color::default(),
            hovered: false,
            colliding: false,
            elasticity,
            density,
            dragging: false,
            drag_anchor: Vec2::ZERO,
            removed: false,
        })
    }

    /// Create a gravity control widget
    pub fn gravity_control(position: Vec2, size: Vec2) -> Result<Self> {
        positive("control width", size.x)?;
        positive("control height", size.y)?;

        Ok(Self {
            id: 0,
            kind: BodyKind::GravityControl,
            size,
            position,
            velocity: Vec2::ZERO,
            priority: CONTROL_PRIORITY,
            color: colors::CONTROL,
            hovered: false,
            colliding: false,
            elasticity: 0.0,
            density: 1.0,
            dragging: false,
            drag_anchor: Vec2::ZERO,
            removed: false,
        })
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn elasticity(&self) -> f32 {
        self.elasticity
    }

    pub fn set_elasticity(&mut self, elasticity: f32) -> Result<()> {
        self.elasticity = check_elasticity(elasticity)?;
        Ok(())
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Density times area (disc for balls, box otherwise)
    pub fn mass(&self) -> f32 {
        match self.kind {
            BodyKind::Ball => self.density * std::f32::consts::PI * self.radius() * self.radius(),
            BodyKind::GravityControl => self.density * self.size.x * self.size.y,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_anchor(&self) -> Vec2 {
        self.drag_anchor
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Flag for removal; the arena drops it at the end of the current tick
    pub fn remove(&mut self) {
        self.removed = true;
    }

    /// Whether this body takes part in pairwise collisions
    pub fn collides(&self) -> bool {
        self.kind == BodyKind::Ball
    }

    /// Hit test for a single point
    pub fn contains_point(&self, p: Vec2) -> bool {
        match self.kind {
            BodyKind::Ball => (self.center() - p).length() <= self.radius(),
            BodyKind::GravityControl => self.size.contains(p - self.position),
        }
    }

    /// Hit test for a set of points (true if any point hits)
    pub fn contains_any(&self, points: &[Vec2]) -> bool {
        points.iter().any(|&p| self.contains_point(p))
    }

    pub fn drag_start(&mut self, p: Vec2) {
        if self.dragging {
            return;
        }
        self.dragging = true;
        self.drag_anchor = p - self.position;
        log::debug!("drag start on body {} at ({}, {})", self.id, p.x, p.y);
    }

    /// Follow the pointer. Balls move with it; the gravity control stays put
    /// and reports a new gravity vector instead.
    pub fn drag_move(&mut self, p: Vec2) -> DragEffect {
        if !self.dragging {
            return DragEffect::None;
        }
        match self.kind {
            BodyKind::Ball => {
                self.position = p - self.drag_anchor;
                DragEffect::None
            }
            BodyKind::GravityControl => {
                self.drag_anchor = (p - self.position).clamp(Vec2::ZERO, self.size);
                let gravity = (self.drag_anchor - self.size * 0.5) / CONTROL_GRAVITY_SCALE;
                DragEffect::SetGravity(gravity)
            }
        }
    }

    /// Release. A ball is thrown with the pointer's last measured velocity.
    pub fn drag_end(&mut self, p: Vec2, pointer_velocity: Vec2) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.kind == BodyKind::Ball {
            self.velocity = pointer_velocity;
        }
        log::debug!(
            "drag end on body {} at ({}, {}), velocity ({}, {})",
            self.id,
            p.x,
            p.y,
            self.velocity.x,
            self.velocity.y
        );
    }

    /// Quantize, reflect off walls, apply gravity, integrate, clamp.
    ///
    /// Reflection uses the position from the previous tick, so a body sitting
    /// on a wall with outward velocity bounces before moving further out.
    /// Gravity only applies while the projected extent is inside the arena;
    /// a body pushed past an edge coasts until clamped back in.
    pub fn advance(&mut self, ctx: &TickContext) {
        self.velocity = self.velocity.round_to(QUANTIZE_DECIMALS);
        self.position = self.position.round_to(QUANTIZE_DECIMALS);

        let far = ctx.bounds - self.size;
        self.velocity.x = reflect_axis(self.position.x, self.velocity.x, far.x, self.elasticity);
        self.velocity.y = reflect_axis(self.position.y, self.velocity.y, far.y, self.elasticity);

        if ctx.bounds.contains(self.position + self.size) {
            self.velocity += ctx.gravity;
        }
        self.position += self.velocity;

        self.clamp_to_arena(ctx.bounds);
    }

    /// Pull the body's extent back inside `[0, bounds]`
    pub fn clamp_to_arena(&mut self, bounds: Vec2) {
        let excess = self.position + self.size - bounds;
        if excess.x > 0.0 {
            self.position.x -= excess.x;
        }
        if excess.y > 0.0 {
            self.position.y -= excess.y;
        }
        self.position = self.position.max(Vec2::ZERO);
    }

    /// Draw descriptor in the current visual state
    pub fn draw_command(&self, gravity: Vec2) -> DrawCommand {
        let state = VisualState {
            hovered: self.hovered,
            dragging: self.dragging,
            colliding: self.colliding,
        };
        match self.kind {
            BodyKind::Ball => {
                let color = if self.dragging {
                    self.color.with_alpha(DRAG_ALPHA)
                } else if self.hovered {
                    self.color.with_alpha(HOVER_ALPHA)
                } else if self.colliding {
                    colors::COLLISION
                } else {
                    self.color
                };
                DrawCommand {
                    id: self.id,
                    kind: self.kind,
                    shape: Shape::Circle {
                        center: self.center(),
                        radius: self.radius(),
                    },
                    state,
                    color,
                    handle: None,
                }
            }
            BodyKind::GravityControl => DrawCommand {
                id: self.id,
                kind: self.kind,
                shape: Shape::Rect {
                    origin: self.position,
                    size: self.size,
                },
                state,
                color: if self.hovered {
                    colors::CONTROL_HOVER
                } else {
                    self.color
                },
                handle: Some(self.center() + gravity * CONTROL_GRAVITY_SCALE),
            },
        }
    }
}

/// Run the full update for the body at `index`: collisions against its
/// siblings first, then its own motion. Dragged and removed bodies are skipped.
pub fn update_body(bodies: &mut [Body], index: usize, ctx: &TickContext) {
    let body = &bodies[index];
    if body.dragging || body.removed {
        return;
    }
    let kind = body.kind;
    match kind {
        BodyKind::Ball => {
            resolve_collisions(bodies, index, ctx.bounds);
            bodies[index].advance(ctx);
        }
        BodyKind::GravityControl => {}
    }
}

/// Bounce one axis off the near (0) or far edge, bleeding speed
#[inline]
fn reflect_axis(pos: f32, vel: f32, far: f32, elasticity: f32) -> f32 {
    if pos >= far && vel > 0.0 {
        -vel.abs() * elasticity
    } else if pos <= 0.0 && vel < 0.0 {
        vel.abs() * elasticity
    } else {
        vel
    }
}

fn check_elasticity(elasticity: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&elasticity) {
        Ok(elasticity)
    } else {
        Err(SandboxError::InvalidParameter {
            name: "elasticity",
            value: elasticity,
            expected: "a value in [0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn ctx(gravity: Vec2) -> TickContext {
        TickContext {
            bounds: BOUNDS,
            gravity,
        }
    }

    #[test]
    fn test_construction_rejects_bad_parameters() {
        assert!(Body::ball(10.0, 0.5, 0.0).is_err());
        assert!(Body::ball(10.0, 0.5, -1.0).is_err());
        assert!(Body::ball(0.0, 0.5, 1.0).is_err());
        assert!(Body::ball(10.0, 1.5, 1.0).is_err());
        assert!(Body::ball(10.0, -0.1, 1.0).is_err());
        assert!(Body::ball(10.0, f32::NAN, 1.0).is_err());
        assert!(Body::gravity_control(Vec2::ZERO, Vec2::new(0.0, 10.0)).is_err());

        let mut ball = Body::ball(10.0, 0.5, 1.0).unwrap();
        assert!(ball.set_elasticity(2.0).is_err());
        assert_eq!(ball.elasticity(), 0.5);
    }

    #[test]
    fn test_mass_is_density_times_area() {
        let ball = Body::ball(10.0, 1.0, 2.0).unwrap();
        assert!((ball.mass() - 2.0 * std::f32::consts::PI * 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_ball_contains_point() {
        let ball = Body::ball(20.0, 1.0, 1.0).unwrap().at(Vec2::new(100.0, 100.0));
        assert!(ball.contains_point(Vec2::new(120.0, 120.0)));
        assert!(ball.contains_point(Vec2::new(140.0, 120.0)));
        // Corner of the bounding box is outside the circle
        assert!(!ball.contains_point(Vec2::new(101.0, 101.0)));
        assert!(ball.contains_any(&[Vec2::ZERO, Vec2::new(125.0, 115.0)]));
        assert!(!ball.contains_any(&[Vec2::ZERO]));
    }

    #[test]
    fn test_control_contains_point_is_rectangular() {
        let control =
            Body::gravity_control(Vec2::new(20.0, 20.0), Vec2::new(100.0, 100.0)).unwrap();
        assert!(control.contains_point(Vec2::new(21.0, 21.0)));
        assert!(control.contains_point(Vec2::new(120.0, 120.0)));
        assert!(!control.contains_point(Vec2::new(19.0, 50.0)));
    }

    #[test]
    fn test_drag_protocol() {
        let mut ball = Body::ball(10.0, 1.0, 1.0).unwrap().at(Vec2::new(50.0, 50.0));

        // Stale move/end are no-ops
        assert_eq!(ball.drag_move(Vec2::new(0.0, 0.0)), DragEffect::None);
        ball.drag_end(Vec2::ZERO, Vec2::new(9.0, 9.0));
        assert_eq!(ball.position, Vec2::new(50.0, 50.0));
        assert_eq!(ball.velocity, Vec2::ZERO);

        ball.drag_start(Vec2::new(55.0, 58.0));
        assert!(ball.is_dragging());
        assert_eq!(ball.drag_anchor(), Vec2::new(5.0, 8.0));

        // A second start keeps the original anchor
        ball.drag_start(Vec2::new(60.0, 60.0));
        assert_eq!(ball.drag_anchor(), Vec2::new(5.0, 8.0));

        ball.drag_move(Vec2::new(105.0, 208.0));
        assert_eq!(ball.position, Vec2::new(100.0, 200.0));

        ball.drag_end(Vec2::new(105.0, 208.0), Vec2::new(0.5, -0.3));
        assert!(!ball.is_dragging());
        assert_eq!(ball.velocity, Vec2::new(0.5, -0.3));
    }

    #[test]
    fn test_gravity_control_drag_sets_gravity() {
        let mut control =
            Body::gravity_control(Vec2::new(20.0, 20.0), Vec2::new(100.0, 100.0)).unwrap();
        control.drag_start(Vec2::new(70.0, 70.0));

        // Center of the widget means no gravity
        assert_eq!(
            control.drag_move(Vec2::new(70.0, 70.0)),
            DragEffect::SetGravity(Vec2::ZERO)
        );
        // Bottom edge, clamped: (50 / 50) = 1 downward
        assert_eq!(
            control.drag_move(Vec2::new(70.0, 500.0)),
            DragEffect::SetGravity(Vec2::new(0.0, 1.0))
        );
        assert_eq!(control.position, Vec2::new(20.0, 20.0));

        control.drag_end(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(control.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_wall_reflection_before_integration() {
        // Sitting on the floor moving down: bounce, then integrate upward
        let mut ball = Body::ball(20.0, 0.5, 1.0)
            .unwrap()
            .at(Vec2::new(100.0, 560.0))
            .with_velocity(Vec2::new(0.0, 4.0));
        ball.advance(&ctx(Vec2::ZERO));
        assert_eq!(ball.velocity, Vec2::new(0.0, -2.0));
        assert_eq!(ball.position, Vec2::new(100.0, 558.0));

        // Left wall moving left: flips to positive
        let mut ball = Body::ball(20.0, 1.0, 1.0)
            .unwrap()
            .at(Vec2::new(0.0, 100.0))
            .with_velocity(Vec2::new(-3.0, 0.0));
        ball.advance(&ctx(Vec2::ZERO));
        assert_eq!(ball.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(ball.position, Vec2::new(3.0, 100.0));
    }

    #[test]
    fn test_quantization() {
        let mut ball = Body::ball(20.0, 1.0, 1.0)
            .unwrap()
            .at(Vec2::new(100.04, 100.0))
            .with_velocity(Vec2::new(1.26, 0.0));
        ball.advance(&ctx(Vec2::ZERO));
        assert!((ball.velocity.x - 1.3).abs() < 1e-5);
        assert!((ball.position.x - 101.3).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_suppressed_outside_arena() {
        // Extent already past the floor: no gravity this tick, then clamped
        let mut ball = Body::ball(20.0, 1.0, 1.0)
            .unwrap()
            .at(Vec2::new(100.0, 580.0))
            .with_velocity(Vec2::ZERO);
        ball.advance(&ctx(Vec2::new(0.0, 0.5)));
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert_eq!(ball.position, Vec2::new(100.0, 560.0));
    }

    #[test]
    fn test_clamp_to_arena() {
        let mut ball = Body::ball(20.0, 1.0, 1.0).unwrap().at(Vec2::new(790.0, -5.0));
        ball.clamp_to_arena(BOUNDS);
        assert_eq!(ball.position, Vec2::new(760.0, 0.0));
    }

    #[test]
    fn test_draw_command_color_priority() {
        let base = Color::rgb(0.5, 0.5, 0.5);
        let mut ball = Body::ball(10.0, 1.0, 1.0).unwrap().with_color(base);
        ball.colliding = true;
        assert_eq!(ball.draw_command(Vec2::ZERO).color, colors::COLLISION);
        ball.hovered = true;
        assert_eq!(ball.draw_command(Vec2::ZERO).color, base.with_alpha(HOVER_ALPHA));
        ball.drag_start(Vec2::ZERO);
        let cmd = ball.draw_command(Vec2::ZERO);
        assert_eq!(cmd.color, base.with_alpha(DRAG_ALPHA));
        assert!(cmd.state.dragging && cmd.state.hovered && cmd.state.colliding);
        assert_eq!(
            cmd.shape,
            Shape::Circle {
                center: Vec2::splat(10.0),
                radius: 10.0
            }
        );
    }

    #[test]
    fn test_control_draw_handle_tracks_gravity() {
        let control =
            Body::gravity_control(Vec2::new(20.0, 20.0), Vec2::new(100.0, 100.0)).unwrap();
        let cmd = control.draw_command(Vec2::new(0.2, -0.4));
        assert_eq!(cmd.handle, Some(Vec2::new(80.0, 50.0)));
    }

    proptest! {
        #[test]
        fn prop_at_rest_stays_put(x in 0u32..760, y in 0u32..560, ticks in 1usize..200) {
            let start = Vec2::new(x as f32, y as f32);
            let mut ball = Body::ball(20.0, 0.9, 1.0).unwrap().at(start);
            for _ in 0..ticks {
                ball.advance(&ctx(Vec2::ZERO));
            }
            prop_assert_eq!(ball.position, start);
            prop_assert_eq!(ball.velocity, Vec2::ZERO);
        }

        #[test]
        fn prop_extent_stays_in_arena(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            radius in 1.0f32..100.0,
            gy in -2.0f32..2.0,
        ) {
            let mut ball = Body::ball(radius, 0.95, 1.0)
                .unwrap()
                .at(Vec2::new(x, y))
                .with_velocity(Vec2::new(vx, vy));
            ball.advance(&ctx(Vec2::new(0.0, gy)));
            let far = ball.position + ball.size;
            prop_assert!(ball.position.x >= 0.0 && ball.position.y >= 0.0);
            prop_assert!(far.x <= BOUNDS.x + 1e-3 && far.y <= BOUNDS.y + 1e-3);
        }
    }
}
