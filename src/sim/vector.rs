//! Vector helpers on top of `glam::Vec2`
//!
//! glam covers add/scale/component-wise multiply/dot/length. The engine
//! also needs scalar projection, decimal rounding, and the box containment
//! test used for arena bounds and rectangular bodies.

use glam::Vec2;

use crate::round_to;

/// Extra operations the engine needs on 2D vectors
pub trait VectorExt {
    /// Scalar projection of `self` onto `axis` (`self · axis / |axis|`).
    /// Returns 0 for a zero-length axis.
    fn projection(self, axis: Vec2) -> f32;

    /// Round each component to `decimals` decimal places
    fn round_to(self, decimals: u32) -> Self;

    /// True if `p` lies in the box `[0, self.x] × [0, self.y]`
    fn contains(self, p: Vec2) -> bool;
}

impl VectorExt for Vec2 {
    #[inline]
    fn projection(self, axis: Vec2) -> f32 {
        let len = axis.length();
        if len > 0.0 { self.dot(axis) / len } else { 0.0 }
    }

    #[inline]
    fn round_to(self, decimals: u32) -> Self {
        Vec2::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }

    #[inline]
    fn contains(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.x && p.y <= self.y
    }
}
