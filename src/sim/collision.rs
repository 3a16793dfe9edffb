//! Circle-circle collision detection and response
//!
//! Detection is discrete: two balls collide when their circles touch or
//! overlap at the start of the resolving ball's update. Response is the 1D
//! elastic collision formula applied along the line of centers; the
//! tangential component of each velocity is left alone. Fast, small balls
//! can tunnel through each other between ticks.

use glam::Vec2;

use super::body::Body;
use super::vector::VectorExt;

/// Outcome of checking one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Circles don't touch
    Separate,
    /// Velocities exchanged and bodies pushed apart
    Resolved {
        /// Unit vector from the second body's center to the first's
        normal: Vec2,
        /// Penetration depth before correction
        overlap: f32,
    },
    /// Centers coincide; no collision axis exists, pair skipped this tick
    Degenerate,
}

/// Check and resolve a collision between `a` (the body being updated) and `b`.
///
/// Both velocities are scaled by `a`'s elasticity after the exchange. The
/// overlap is split evenly between the two bodies, then both are clamped back
/// into `[0, bounds]`.
pub fn resolve_pair(a: &mut Body, b: &mut Body, bounds: Vec2) -> Contact {
    let delta = a.center() - b.center();
    let distance = delta.length();
    let reach = a.radius() + b.radius();

    if distance > reach {
        return Contact::Separate;
    }
    if distance <= f32::EPSILON {
        log::trace!("bodies {} and {} share a center, skipping", a.id(), b.id());
        return Contact::Degenerate;
    }

    let normal = delta / distance;
    let (m1, m2) = (a.mass(), b.mass());
    let total = m1 + m2;

    let v1 = a.velocity.projection(delta);
    let v2 = b.velocity.projection(delta);
    let new_v1 = (2.0 * m2 * v2 + (m1 - m2) * v1) / total;
    let new_v2 = (2.0 * m1 * v1 + (m2 - m1) * v2) / total;

    let restitution = a.elasticity();
    a.velocity = (a.velocity + normal * (new_v1 - v1)) * restitution;
    b.velocity = (b.velocity + normal * (new_v2 - v2)) * restitution;

    let overlap = reach - distance;
    let push = normal * (overlap / 2.0);
    a.position += push;
    b.position -= push;
    a.clamp_to_arena(bounds);
    b.clamp_to_arena(bounds);

    a.colliding = true;
    b.colliding = true;

    Contact::Resolved { normal, overlap }
}

/// Resolve collisions between `bodies[index]` and every other live,
/// non-dragged colliding body, in sequence order. Returns the number of
/// pairs resolved.
pub fn resolve_collisions(bodies: &mut [Body], index: usize, bounds: Vec2) -> usize {
    if !bodies[index].collides() {
        return 0;
    }
    let mut resolved = 0;
    for other in 0..bodies.len() {
        if other == index {
            continue;
        }
        let (a, b) = pair_mut(bodies, index, other);
        if !b.collides() || b.is_dragging() || b.is_removed() {
            continue;
        }
        if let Contact::Resolved { .. } = resolve_pair(a, b, bounds) {
            resolved += 1;
        }
    }
    resolved
}

/// Mutable references to two distinct elements
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
