//! Simulation module
//!
//! All physics and interaction logic lives here. It must stay free of
//! rendering and platform dependencies:
//! - The host drives `tick` and supplies timestamps
//! - Seeded RNG only
//! - Stable iteration order (priority, then insertion)

pub mod arena;
pub mod body;
pub mod collision;
pub mod pointer;
pub mod spawn;
pub mod tick;
pub mod vector;

pub use arena::{Arena, ThroughputMeter};
pub use body::{Body, BodyId, BodyKind, DragEffect, TickContext, update_body};
pub use collision::{Contact, resolve_collisions, resolve_pair};
pub use pointer::{InputSource, Pointer};
pub use spawn::{populate, random_ball};
pub use tick::tick;
pub use vector::VectorExt;
