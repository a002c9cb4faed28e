//! Surface material properties for collision response

use serde::{Serialize, Deserialize};

/// Surface properties the collision solver uses when two bodies touch
///
/// Fixed when a body is created; the solver never changes them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Friction coefficient (0.0 = ice, 1.0 = rubber)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl SurfaceMaterial {
    /// Rolling ball: grippy, half-elastic
    pub const BALL: Self = Self {
        friction: 0.8,
        restitution: 0.5,
    };

    /// Disc shell (face, rim and glass cover)
    pub const DISC: Self = Self {
        friction: 0.5,
        restitution: 0.0,
    };

    /// Create a material; values are clamped to [0.0, 1.0]
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Material for a contact between two surfaces
    ///
    /// Geometric mean for friction, maximum for restitution.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }
}
