//! Fixed-cadence simulation tick
//!
//! One call advances the arena by one step. The host decides the cadence
//! (usually once per display refresh). Each tick runs to completion:
//!
//! 1. Flush pending insertions
//! 2. Select hover and drag targets from the pointer
//! 3. Dispatch drag start/move/end
//! 4. Update every non-dragged body (collisions, then motion)
//! 5. Drop bodies flagged for removal
//! 6. Stable-sort by priority
//! 7. Hand the ordered frame to the renderer

use super::arena::Arena;
use super::body::{DragEffect, TickContext, update_body};
use crate::renderer::Frame;

/// Hover and drag targets found by the selection scan (indices into the
/// live sequence)
#[derive(Debug, Clone, Copy, Default)]
struct Targets {
    /// Last body under the pointer
    hover: Option<usize>,
    /// Body currently being dragged
    drag: Option<usize>,
}

/// Advance the arena by one tick. `now_ms` is the host clock, used only for
/// the updates-per-second sample.
pub fn tick(arena: &mut Arena, now_ms: f64) -> Frame {
    arena.tick_count += 1;
    arena.throughput.record(now_ms);

    flush_pending(arena);
    let targets = select_targets(arena);
    dispatch_drag(arena, targets);
    update_bodies(arena);

    arena.bodies.retain(|b| !b.is_removed());
    // Vec::sort_by_key is stable: equal priorities keep insertion order
    arena.bodies.sort_by_key(|b| b.priority);

    arena.frame()
}

fn flush_pending(arena: &mut Arena) {
    if arena.pending.is_empty() {
        return;
    }
    log::debug!("Adding {} bodies", arena.pending.len());
    arena.bodies.append(&mut arena.pending);
}

fn select_targets(arena: &mut Arena) -> Targets {
    let pointer = arena.pointer.position;
    let mut targets = Targets::default();

    for (i, body) in arena.bodies.iter_mut().enumerate() {
        body.hovered = false;
        body.colliding = false;
        if body.is_removed() {
            continue;
        }
        if body.contains_point(pointer) {
            targets.hover = Some(i);
        }
        if body.is_dragging() {
            targets.drag = Some(i);
        }
    }

    targets
}

fn dispatch_drag(arena: &mut Arena, targets: Targets) {
    let point = arena.pointer.position;

    if let Some(i) = targets.hover {
        arena.bodies[i].hovered = true;
    }

    match targets.drag {
        Some(i) => {
            if let DragEffect::SetGravity(gravity) = arena.bodies[i].drag_move(point) {
                arena.set_gravity(gravity);
            }
            let body = &mut arena.bodies[i];
            if arena.pointer.pressed {
                body.hovered = true;
            } else {
                body.drag_end(point, arena.pointer.velocity);
                body.hovered = false;
            }
        }
        None => {
            if let (true, Some(i)) = (arena.pointer.pressed, targets.hover) {
                arena.bodies[i].drag_start(point);
            }
        }
    }
}

fn update_bodies(arena: &mut Arena) {
    let ctx = TickContext {
        bounds: arena.bounds,
        gravity: arena.gravity,
    };
    for i in 0..arena.bodies.len() {
        update_body(&mut arena.bodies, i, &ctx);
    }
}
