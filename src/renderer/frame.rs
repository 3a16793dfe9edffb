//! Per-tick draw descriptors

use glam::Vec2;
use serde::Serialize;

use super::color::Color;
use crate::sim::{BodyId, BodyKind};

/// Geometry of a body as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { origin: Vec2, size: Vec2 },
}

/// Interaction highlighting flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisualState {
    pub hovered: bool,
    pub dragging: bool,
    pub colliding: bool,
}

/// Everything the renderer needs to paint one body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: Shape,
    pub state: VisualState,
    /// Color after applying the visual state
    pub color: Color,
    /// Knob position for control widgets
    pub handle: Option<Vec2>,
}

/// Output of one tick, in paint order (first command is painted first)
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub gravity: Vec2,
    pub updates_per_second: u32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Ids in paint order
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.commands.iter().map(|c| c.id)
    }
}
