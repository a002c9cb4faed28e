//! Physics scene: the bodies handed to the collision solver
//!
//! The solver itself runs elsewhere. This registry owns what it needs:
//! gravity, the kinematic disc with its shell, and the balls with their
//! materials. The disc's pose is overwritten every frame from the spin
//! controller; nothing here ever integrates it.

use std::fmt;

use discrig_math::{Pose, Vec3};
use slotmap::SlotMap;

use crate::body::{BallSpec, Body, BodyKey, BodyKind};
use crate::material::SurfaceMaterial;
use crate::shapes::DiscGeometry;

/// Error type for physics scene operations
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// No body with this key (never added, or removed)
    UnknownBody(BodyKey),
    /// Tried to pose a body the solver owns
    NotKinematic(BodyKey),
    /// Expected a disc body
    NotADisc(BodyKey),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::UnknownBody(key) => write!(f, "Unknown physics body {:?}", key),
            PhysicsError::NotKinematic(key) => {
                write!(f, "Physics body {:?} is dynamic and cannot be posed externally", key)
            }
            PhysicsError::NotADisc(key) => write!(f, "Physics body {:?} is not a disc", key),
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Bodies, gravity and contact materials for the disc scene
pub struct PhysicsScene {
    bodies: SlotMap<BodyKey, Body>,
    gravity: Vec3,
    /// Number of externally applied kinematic poses
    kinematic_updates: u64,
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.81, 0.0))
    }
}

impl PhysicsScene {
    /// Create an empty scene with a fixed gravity vector
    pub fn new(gravity: Vec3) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity,
            kinematic_updates: 0,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Add a body and return its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Add the kinematic disc at `pose`
    pub fn add_disc(&mut self, pose: Pose, geometry: &DiscGeometry) -> BodyKey {
        let key = self.add_body(Body::disc(pose, geometry));
        log::debug!("Added disc body {:?} at {:?}", key, pose.position);
        key
    }

    /// Add a ball at a world position
    ///
    /// Warns when the ball does not start inside the given disc's shell,
    /// since it would then fall away instead of riding the disc.
    pub fn add_ball_in_disc(
        &mut self,
        disc: BodyKey,
        position: Vec3,
        spec: &BallSpec,
    ) -> Result<BodyKey, PhysicsError> {
        if !self.is_inside_disc(disc, position, spec.radius)? {
            log::warn!(
                "Ball at {:?} does not fit inside disc {:?}; it will fall out",
                position,
                disc
            );
        }
        Ok(self.add_body(Body::ball(position, spec)))
    }

    /// Remove a body and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over bodies of one kind
    pub fn bodies_of_kind(&self, kind: BodyKind) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.bodies.iter().filter(move |(_, body)| body.kind == kind)
    }

    /// Pose a kinematic body for the next solver step
    ///
    /// Dynamic bodies are rejected: their pose belongs to the solver.
    pub fn set_kinematic_pose(&mut self, key: BodyKey, pose: Pose) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(key).ok_or(PhysicsError::UnknownBody(key))?;
        if body.kind != BodyKind::Kinematic {
            return Err(PhysicsError::NotKinematic(key));
        }
        body.pose = pose;
        self.kinematic_updates += 1;
        Ok(())
    }

    /// Current pose of a kinematic body
    pub fn kinematic_pose(&self, key: BodyKey) -> Option<Pose> {
        self.bodies
            .get(key)
            .filter(|body| body.is_kinematic())
            .map(|body| body.pose)
    }

    pub fn kinematic_updates(&self) -> u64 {
        self.kinematic_updates
    }

    /// Whether a sphere at a world position sits inside the disc's shell at
    /// the disc's current pose
    pub fn is_inside_disc(
        &self,
        disc: BodyKey,
        position: Vec3,
        radius: f32,
    ) -> Result<bool, PhysicsError> {
        let body = self.bodies.get(disc).ok_or(PhysicsError::UnknownBody(disc))?;
        let shell = body.disc_shell().ok_or(PhysicsError::NotADisc(disc))?;
        let local = body.pose.inverse_transform_point(position);
        Ok(shell.contains_sphere(local, radius))
    }

    /// Combined material for a contact between two bodies
    pub fn contact_material(&self, a: BodyKey, b: BodyKey) -> Option<SurfaceMaterial> {
        let a = self.bodies.get(a)?;
        let b = self.bodies.get(b)?;
        Some(a.material.combine(&b.material))
    }
}
