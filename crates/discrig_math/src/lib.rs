//! Mathematics for the discrig controllers
//!
//! Small, copyable value types shared by the input controllers, the
//! physics boundary and the host application.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector (screen deltas, planar pan offsets)
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - unit quaternion rotation
//! - [`Pose`] - position + orientation handed to the scene collaborator

mod vec2;
mod vec3;
mod quat;
mod pose;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::Quat;
pub use pose::Pose;
