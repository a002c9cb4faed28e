//! Body types registered with the physics collaborator

use discrig_math::{Pose, Vec3};
use serde::{Serialize, Deserialize};
use slotmap::new_key_type;

use crate::material::SurfaceMaterial;
use crate::shapes::{Collider, DiscGeometry, DiscShell};

new_key_type! {
    /// Key to a body in the physics scene
    ///
    /// Generational, so a key to a removed body never aliases a newer one.
    pub struct BodyKey;
}

/// How a body's pose is decided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Posed from outside every tick; the solver never integrates it but
    /// still collides dynamic bodies against it
    Kinematic,
    /// Moved by the solver under gravity and contacts
    Dynamic,
}

/// Parameters for a free ball
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSpec {
    pub radius: f32,
    /// Velocity damping per second applied by the solver
    pub linear_damping: f32,
    pub material: SurfaceMaterial,
}

impl Default for BallSpec {
    fn default() -> Self {
        Self {
            radius: 0.15,
            linear_damping: 0.3,
            material: SurfaceMaterial::BALL,
        }
    }
}

/// A body known to the physics scene
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    /// World pose; for dynamic bodies this is the spawn pose
    pub pose: Pose,
    pub collider: Collider,
    pub material: SurfaceMaterial,
    pub linear_damping: f32,
}

impl Body {
    /// Kinematic disc whose shell is derived from `geometry`
    pub fn disc(pose: Pose, geometry: &DiscGeometry) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            pose,
            collider: Collider::DiscShell(DiscShell::from_geometry(geometry)),
            material: SurfaceMaterial::DISC,
            linear_damping: 0.0,
        }
    }

    /// Dynamic ball at `position`
    pub fn ball(position: Vec3, spec: &BallSpec) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            pose: Pose::from_position(position),
            collider: Collider::Ball {
                radius: spec.radius,
            },
            material: SurfaceMaterial::new(spec.material.friction, spec.material.restitution),
            linear_damping: spec.linear_damping.max(0.0),
        }
    }

    pub fn is_kinematic(&self) -> bool {
        self.kind == BodyKind::Kinematic
    }

    /// The disc shell, if this body is a disc
    pub fn disc_shell(&self) -> Option<&DiscShell> {
        match &self.collider {
            Collider::DiscShell(shell) => Some(shell),
            Collider::Ball { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_is_kinematic() {
        let body = Body::disc(Pose::IDENTITY, &DiscGeometry::default());
        assert!(body.is_kinematic());
        assert!(body.disc_shell().is_some());
    }

    #[test]
    fn test_ball_takes_spec() {
        let spec = BallSpec::default();
        let body = Body::ball(Vec3::new(0.0, 2.0, -7.8), &spec);
        assert_eq!(body.kind, BodyKind::Dynamic);
        assert_eq!(body.collider, Collider::Ball { radius: 0.15 });
        assert_eq!(body.material, SurfaceMaterial::BALL);
        assert_eq!(body.linear_damping, 0.3);
        assert!(body.disc_shell().is_none());
    }

    #[test]
    fn test_negative_damping_clamped() {
        let spec = BallSpec {
            linear_damping: -1.0,
            ..BallSpec::default()
        };
        assert_eq!(Body::ball(Vec3::ZERO, &spec).linear_damping, 0.0);
    }

    #[test]
    fn test_out_of_range_material_clamped() {
        // Materials read from config bypass SurfaceMaterial::new
        let spec = BallSpec {
            material: SurfaceMaterial {
                friction: 3.0,
                restitution: -0.2,
            },
            ..BallSpec::default()
        };
        let body = Body::ball(Vec3::ZERO, &spec);
        assert_eq!(body.material.friction, 1.0);
        assert_eq!(body.material.restitution, 0.0);
    }
}
