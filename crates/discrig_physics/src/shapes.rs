//! Collision shapes for the disc and the balls it carries
//!
//! The disc shell is derived from the disc's visual dimensions so the
//! collision surfaces line up with what is drawn. All disc coordinates are
//! in the disc's local frame, where +Y is the face normal.

use discrig_math::Vec3;
use serde::{Serialize, Deserialize};

/// Slack when checking that the rim meets the floor and cover
const SEAL_TOLERANCE: f32 = 1e-4;

/// Visual dimensions of the disc (local frame, +Y = face normal)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscGeometry {
    /// Radius of the faces and the rim
    pub radius: f32,
    /// Distance of the front and back faces from the disc center
    pub face_offset: f32,
    /// Height of the rim band
    pub rim_height: f32,
    /// Local Y of the rim band's center
    pub rim_center: f32,
    /// Local Y of the glass cover
    pub cover_offset: f32,
}

impl Default for DiscGeometry {
    fn default() -> Self {
        Self {
            radius: 2.0,
            face_offset: 0.076,
            rim_height: 0.58,
            rim_center: 0.21,
            cover_offset: 0.5,
        }
    }
}

/// A flat circular surface at local height `y`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskCollider {
    pub y: f32,
    pub radius: f32,
}

/// An open cylinder (no caps) around the local Y axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RimCollider {
    pub center_y: f32,
    pub half_height: f32,
    pub radius: f32,
}

impl RimCollider {
    pub fn min_y(&self) -> f32 {
        self.center_y - self.half_height
    }

    pub fn max_y(&self) -> f32 {
        self.center_y + self.half_height
    }
}

/// The container balls roll in: back face as floor, rim as walls, glass
/// cover as ceiling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscShell {
    pub floor: DiskCollider,
    pub rim: RimCollider,
    pub cover: DiskCollider,
}

impl DiscShell {
    /// Build the shell from the visual geometry
    pub fn from_geometry(geometry: &DiscGeometry) -> Self {
        Self {
            floor: DiskCollider {
                y: -geometry.face_offset,
                radius: geometry.radius,
            },
            rim: RimCollider {
                center_y: geometry.rim_center,
                half_height: geometry.rim_height * 0.5,
                radius: geometry.radius,
            },
            cover: DiskCollider {
                y: geometry.cover_offset,
                radius: geometry.radius,
            },
        }
    }

    /// Whether a sphere at `center` (disc-local) fits strictly inside the
    /// shell without touching any surface
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        let radial = (center.x * center.x + center.z * center.z).sqrt();
        center.y - radius > self.floor.y
            && center.y + radius < self.cover.y
            && radial + radius < self.rim.radius
    }

    /// Whether the rim closes the gap between floor and cover
    pub fn is_sealed(&self) -> bool {
        self.rim.min_y() <= self.floor.y + SEAL_TOLERANCE
            && self.rim.max_y() >= self.cover.y - SEAL_TOLERANCE
    }
}

/// Collision shape attached to a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    Ball { radius: f32 },
    DiscShell(DiscShell),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_follows_geometry() {
        let shell = DiscShell::from_geometry(&DiscGeometry::default());
        assert_eq!(shell.floor.y, -0.076);
        assert_eq!(shell.cover.y, 0.5);
        assert_eq!(shell.rim.radius, 2.0);
    }

    #[test]
    fn test_default_rim_seals_the_container() {
        // Rim spans [-0.08, 0.5], covering floor at -0.076 and cover at 0.5
        let shell = DiscShell::from_geometry(&DiscGeometry::default());
        assert!(shell.is_sealed());
    }

    #[test]
    fn test_short_rim_leaves_gap() {
        let geometry = DiscGeometry {
            rim_height: 0.2,
            ..DiscGeometry::default()
        };
        assert!(!DiscShell::from_geometry(&geometry).is_sealed());
    }

    #[test]
    fn test_contains_sphere() {
        let shell = DiscShell::from_geometry(&DiscGeometry::default());
        assert!(shell.contains_sphere(Vec3::new(0.0, 0.2, 0.0), 0.15));
        // Pokes through the cover
        assert!(!shell.contains_sphere(Vec3::new(0.0, 0.4, 0.0), 0.15));
        // Pokes through the rim
        assert!(!shell.contains_sphere(Vec3::new(1.9, 0.2, 0.0), 0.15));
        // Below the floor
        assert!(!shell.contains_sphere(Vec3::new(0.0, -0.2, 0.0), 0.15));
    }
}
