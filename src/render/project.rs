//! Perspective projection from simulation space to the viewport
//!
//! Simulation space is centered on the viewport midpoint; depth only
//! scales apparent position and size. Entities projected far outside
//! the viewport are culled from the draw list but keep simulating.

use crate::math::Vec3;

/// Fixed focal length of the projection
pub const FOCAL_LENGTH: f32 = 600.0;
/// Entities this far beyond any viewport edge are not drawn
pub const CULL_MARGIN: f32 = 100.0;

/// Output surface dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// A point projected onto the viewport
#[derive(Debug, Clone, Copy)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Apparent scale at this depth (1.0 at z = 0)
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn project(&self, p: Vec3) -> Projected {
        let scale = FOCAL_LENGTH / (FOCAL_LENGTH + p.z);
        Projected {
            x: self.width / 2.0 + p.x * scale,
            y: self.height / 2.0 + p.y * scale,
            scale,
        }
    }

    pub fn is_culled(&self, proj: &Projected) -> bool {
        proj.x < -CULL_MARGIN
            || proj.x > self.width + CULL_MARGIN
            || proj.y < -CULL_MARGIN
            || proj.y > self.height + CULL_MARGIN
    }
}
