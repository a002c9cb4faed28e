//! Pointer picking against the disc
//!
//! Turns a cursor position into a world-space ray through the camera and
//! tests it against the disc's volume (faces, rim and cover treated as one
//! capped cylinder in the disc's local frame). The result decides whether a
//! pointer-down belongs to the disc or to the camera.

use discrig_input::{CameraPose, PointerTarget};
use discrig_math::{Pose, Vec2, Vec3};
use discrig_physics::DiscGeometry;

const PARALLEL_EPSILON: f32 = 1e-6;

/// Perspective projection used to build picking rays
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// A half-line in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Ray from the camera through a cursor position in window pixels
    /// (origin top-left, y down)
    pub fn from_screen(
        camera: &CameraPose,
        projection: &Projection,
        viewport: Vec2,
        cursor: Vec2,
    ) -> Self {
        let width = viewport.x.max(1.0);
        let height = viewport.y.max(1.0);
        let ndc_x = 2.0 * cursor.x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / height;

        let tan_half = (projection.fov_degrees.to_radians() * 0.5).tan();
        let aspect = width / height;
        // Camera looks down its local -Z
        let local = Vec3::new(ndc_x * tan_half * aspect, ndc_y * tan_half, -1.0);

        Self::new(camera.position, camera.orientation().rotate(local))
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the disc volume, if it hits within `[near, far]`
pub fn intersect_disc(
    ray: &Ray,
    disc_pose: &Pose,
    geometry: &DiscGeometry,
    projection: &Projection,
) -> Option<f32> {
    let origin = disc_pose.inverse_transform_point(ray.origin);
    let direction = disc_pose.orientation.conjugate().rotate(ray.direction);

    // Slab between the back face and the cover along local Y
    let (slab_enter, slab_exit) = interval(
        origin.y,
        direction.y,
        -geometry.face_offset,
        geometry.cover_offset,
    )?;

    // Infinite cylinder around local Y
    let a = direction.x * direction.x + direction.z * direction.z;
    let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
    let c = origin.x * origin.x + origin.z * origin.z - geometry.radius * geometry.radius;
    let (cyl_enter, cyl_exit) = if a < PARALLEL_EPSILON {
        if c > 0.0 {
            return None;
        }
        (f32::NEG_INFINITY, f32::INFINITY)
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        ((-b - root) / (2.0 * a), (-b + root) / (2.0 * a))
    };

    let enter = slab_enter.max(cyl_enter).max(projection.near);
    let exit = slab_exit.min(cyl_exit).min(projection.far);
    (enter <= exit).then_some(enter)
}

/// Classify a cursor position as on the disc or on the background
pub fn pick_target(
    camera: &CameraPose,
    projection: &Projection,
    viewport: Vec2,
    cursor: Vec2,
    disc_pose: &Pose,
    geometry: &DiscGeometry,
) -> PointerTarget {
    let ray = Ray::from_screen(camera, projection, viewport, cursor);
    match intersect_disc(&ray, disc_pose, geometry, projection) {
        Some(t) => {
            log::trace!("Pointer ray hit disc at {:?}", ray.at(t));
            PointerTarget::Disc
        }
        None => PointerTarget::Background,
    }
}

/// Parameter interval where `origin + t * direction` lies in `[min, max]`
fn interval(origin: f32, direction: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if direction.abs() < PARALLEL_EPSILON {
        return (min..=max)
            .contains(&origin)
            .then_some((f32::NEG_INFINITY, f32::INFINITY));
    }
    let t0 = (min - origin) / direction;
    let t1 = (max - origin) / direction;
    Some((t0.min(t1), t0.max(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use discrig_input::CameraController;
    use discrig_math::Quat;
    use std::f32::consts::FRAC_PI_2;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn disc_pose() -> Pose {
        Pose::new(Vec3::new(0.0, 2.0, -8.0), Quat::from_rotation_x(FRAC_PI_2))
    }

    #[test]
    fn test_center_ray_points_at_anchor() {
        let camera = CameraController::new().pose();
        let ray = Ray::from_screen(&camera, &Projection::default(), VIEWPORT, Vec2::new(640.0, 360.0));
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_cursor_above_center_tilts_ray_up() {
        let camera = CameraController::new().pose();
        let ray = Ray::from_screen(&camera, &Projection::default(), VIEWPORT, Vec2::new(640.0, 100.0));
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.x.abs() < 1e-5);
    }

    #[test]
    fn test_center_hits_cover() {
        let camera = CameraController::new().pose();
        let projection = Projection::default();
        let ray = Ray::from_screen(&camera, &projection, VIEWPORT, Vec2::new(640.0, 360.0));
        let t = intersect_disc(&ray, &disc_pose(), &DiscGeometry::default(), &projection).unwrap();
        // Camera at z=2, cover at z=-7.5
        assert!((t - 9.5).abs() < 1e-4);
    }

    #[test]
    fn test_pick_target() {
        let camera = CameraController::new().pose();
        let projection = Projection::default();
        let geometry = DiscGeometry::default();

        let on_disc = pick_target(
            &camera,
            &projection,
            VIEWPORT,
            Vec2::new(660.0, 400.0),
            &disc_pose(),
            &geometry,
        );
        assert_eq!(on_disc, PointerTarget::Disc);

        let corner = pick_target(
            &camera,
            &projection,
            VIEWPORT,
            Vec2::new(10.0, 10.0),
            &disc_pose(),
            &geometry,
        );
        assert_eq!(corner, PointerTarget::Background);
    }

    #[test]
    fn test_edge_on_disc_is_hit_through_rim() {
        // Camera on +X looking along -X at the upright disc
        let camera = CameraController::new().with_orbit(FRAC_PI_2, 0.0, 10.0).pose();
        let projection = Projection::default();
        let ray = Ray::from_screen(&camera, &projection, VIEWPORT, Vec2::new(640.0, 360.0));
        let t = intersect_disc(&ray, &disc_pose(), &DiscGeometry::default(), &projection).unwrap();
        assert!((t - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_hit_behind_camera_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, -20.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_disc(&ray, &disc_pose(), &DiscGeometry::default(), &Projection::default());
        assert_eq!(hit, None);
    }

    #[test]
    fn test_far_plane_limits_hits() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let projection = Projection {
            far: 5.0,
            ..Projection::default()
        };
        assert_eq!(
            intersect_disc(&ray, &disc_pose(), &DiscGeometry::default(), &projection),
            None
        );
    }
}
