//! Rigid pose: position plus orientation

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::{Quat, Vec3};

/// Position and orientation of a body in world space
///
/// Recomputed from controller state every tick; nothing keeps history.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Map a point from the body's local frame into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.orientation.rotate(local) + self.position
    }

    /// Map a world-space point into the body's local frame
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.orientation.conjugate().rotate(world - self.position)
    }
}
