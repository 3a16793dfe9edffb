//! Render handoff
//!
//! The engine draws nothing itself. Each tick produces a [`Frame`]: one
//! [`DrawCommand`] per live body in paint order, for an external renderer
//! to rasterize however it likes.

pub mod color;
pub mod frame;

pub use color::Color;
pub use frame::{DrawCommand, Frame, Shape, VisualState};
