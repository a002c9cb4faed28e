//! Physics collaborator boundary for the spinning disc
//!
//! This crate describes what the collision solver works with:
//! - The disc shell (floor, rim, glass cover) derived from the disc geometry
//! - Dynamic balls with surface materials and damping
//! - A kinematic disc body whose pose is supplied from outside each frame
//!
//! The solver that resolves contacts is an external service and is not
//! part of this crate.

pub mod body;
pub mod material;
pub mod scene;
pub mod shapes;

// Re-export commonly used types
pub use body::{BallSpec, Body, BodyKey, BodyKind};
pub use material::SurfaceMaterial;
pub use scene::{PhysicsError, PhysicsScene};
pub use shapes::{Collider, DiscGeometry, DiscShell, DiskCollider, RimCollider};
