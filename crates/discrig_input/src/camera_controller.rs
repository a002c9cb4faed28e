//! Orbit camera controller
//!
//! Controls:
//! - Arrow keys / WASD: pan the anchor, relative to the camera heading
//! - Pointer drag: orbit around the anchor
//! - Scroll wheel: zoom (distance to the anchor)
//!
//! The camera sits on a sphere around the anchor (the subject position plus
//! a planar pan offset) and always looks at the anchor.

use std::f32::consts::FRAC_PI_2;

use discrig_math::{Pose, Quat, Vec2, Vec3};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::hub::{InputListener, Propagation};
use crate::input_state::{finite_or, NavKeys, PointerEvent};

/// Spherical coordinates of the camera around its anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    /// Heading around world Y (radians, unbounded)
    pub horizontal: f32,
    /// Elevation above the anchor plane (radians, kept off the poles)
    pub vertical: f32,
    /// Distance from the anchor, always positive
    pub distance: f32,
    /// Pan offset on the XZ plane (`y` maps to world Z)
    pub offset: Vec2,
}

/// Orbit-drag tracking
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraDrag {
    pub active: bool,
    pub last_pointer: Vec2,
}

/// Camera placement produced each tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Look-at point (the anchor)
    pub target: Vec3,
}

impl CameraPose {
    /// Orientation looking from `position` at `target` with world Y up
    pub fn orientation(&self) -> Quat {
        Quat::look_rotation(self.target - self.position, Vec3::Y)
    }

    pub fn to_pose(&self) -> Pose {
        Pose::new(self.position, self.orientation())
    }
}

/// Camera controller for handling navigation input
pub struct CameraController {
    keys: NavKeys,
    drag: CameraDrag,
    orbit: OrbitState,
    /// Orbit restored by [`CameraController::reset`]
    home: OrbitState,
    /// Subject position the orbit is centered on before panning
    anchor: Vec3,

    // Configuration
    pub pan_speed: f32,
    pub horizontal_sensitivity: f32,
    pub vertical_sensitivity: f32,
    pub zoom_speed: f32,
    pole_margin: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        let orbit = OrbitState {
            horizontal: 0.0,
            vertical: 0.0,
            distance: 10.0,
            offset: Vec2::ZERO,
        };
        Self {
            keys: NavKeys::empty(),
            drag: CameraDrag::default(),
            orbit,
            home: orbit,
            anchor: Vec3::new(0.0, 2.0, -8.0),

            pan_speed: 0.1,
            horizontal_sensitivity: 0.005,
            vertical_sensitivity: 0.005,
            zoom_speed: 0.5,
            pole_margin: 0.1,
            min_distance: 2.0,
            max_distance: 50.0,
        }
    }

    /// Key pressed; returns whether the key steers the camera
    pub fn on_key_down(&mut self, key: KeyCode) -> bool {
        self.process_keyboard(key, ElementState::Pressed)
    }

    /// Key released; returns whether the key steers the camera
    pub fn on_key_up(&mut self, key: KeyCode) -> bool {
        self.process_keyboard(key, ElementState::Released)
    }

    /// Process keyboard input, ignoring keys without a navigation intent
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        match NavKeys::from_key_code(key) {
            Some(intent) => {
                self.keys.set(intent, state == ElementState::Pressed);
                true
            }
            None => false,
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.drag = CameraDrag {
            active: true,
            last_pointer: Vec2::new(x, y),
        };
        log::debug!("Camera orbit drag started at ({:.0}, {:.0})", x, y);
    }

    /// Orbit by the screen-space delta since the last pointer sample
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !self.drag.active || !(x.is_finite() && y.is_finite()) {
            return;
        }
        let pointer = Vec2::new(x, y);
        let delta = pointer - self.drag.last_pointer;
        self.drag.last_pointer = pointer;

        self.orbit.horizontal -= delta.x * self.horizontal_sensitivity;
        self.orbit.vertical = self.clamp_vertical(self.orbit.vertical + delta.y * self.vertical_sensitivity);
    }

    pub fn on_pointer_up(&mut self) {
        if self.drag.active {
            log::debug!("Camera orbit drag ended");
        }
        self.drag.active = false;
    }

    /// Zoom by scroll lines; positive moves toward the anchor
    pub fn on_scroll(&mut self, lines: f32) {
        if !lines.is_finite() {
            return;
        }
        self.orbit.distance = (self.orbit.distance - lines * self.zoom_speed)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Advance one frame: apply held pan keys, then place the camera
    pub fn tick(&mut self) -> CameraPose {
        let forward = self.keys.axis(NavKeys::PAN_FORWARD, NavKeys::PAN_BACK);
        let right = self.keys.axis(NavKeys::PAN_RIGHT, NavKeys::PAN_LEFT);

        if forward != 0.0 || right != 0.0 {
            let (sin_h, cos_h) = self.orbit.horizontal.sin_cos();
            // Forward points from the camera toward the anchor
            let forward_dir = Vec2::new(-sin_h, -cos_h);
            let right_dir = Vec2::new(cos_h, -sin_h);
            self.orbit.offset += (forward_dir * forward + right_dir * right) * self.pan_speed;
        }

        self.pose()
    }

    /// Camera placement for the current orbit, without advancing
    pub fn pose(&self) -> CameraPose {
        let target = self.anchor_point();
        let (sin_h, cos_h) = self.orbit.horizontal.sin_cos();
        let (sin_v, cos_v) = self.orbit.vertical.sin_cos();
        let d = self.orbit.distance;

        let position = Vec3::new(
            target.x + sin_h * cos_v * d,
            target.y + sin_v * d,
            target.z + cos_h * cos_v * d,
        );
        CameraPose { position, target }
    }

    /// Subject position plus the pan offset, at the subject's height
    pub fn anchor_point(&self) -> Vec3 {
        Vec3::new(
            self.anchor.x + self.orbit.offset.x,
            self.anchor.y,
            self.anchor.z + self.orbit.offset.y,
        )
    }

    /// Restore the starting orbit and drop any pan offset or drag
    pub fn reset(&mut self) {
        self.orbit = self.home;
        self.drag = CameraDrag::default();
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn drag(&self) -> &CameraDrag {
        &self.drag
    }

    pub fn held_keys(&self) -> NavKeys {
        self.keys
    }

    /// Check if any pan key is held
    pub fn is_moving(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Highest allowed |vertical| angle
    pub fn vertical_limit(&self) -> f32 {
        FRAC_PI_2 - self.pole_margin
    }

    pub fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    fn clamp_vertical(&self, angle: f32) -> f32 {
        let limit = self.vertical_limit();
        angle.clamp(-limit, limit)
    }

    /// Builder: set the subject position the camera orbits
    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    /// Builder: set the starting orbit (also used by `reset`)
    ///
    /// The vertical angle and distance are pulled back inside their limits.
    pub fn with_orbit(mut self, horizontal: f32, vertical: f32, distance: f32) -> Self {
        let horizontal = finite_or(horizontal, self.home.horizontal, "orbit heading");
        let vertical = finite_or(vertical, self.home.vertical, "orbit elevation");
        let distance = finite_or(distance, self.home.distance, "orbit distance");
        self.home = OrbitState {
            horizontal,
            vertical: self.clamp_vertical(vertical),
            distance: distance.clamp(self.min_distance, self.max_distance),
            offset: Vec2::ZERO,
        };
        self.orbit = self.home;
        self
    }

    /// Builder: set per-tick pan distance
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = finite_or(speed, self.pan_speed, "pan speed");
        self
    }

    /// Builder: set radians of orbit per pixel of drag
    pub fn with_sensitivity(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_sensitivity =
            finite_or(horizontal, self.horizontal_sensitivity, "horizontal sensitivity");
        self.vertical_sensitivity =
            finite_or(vertical, self.vertical_sensitivity, "vertical sensitivity");
        self
    }

    /// Builder: set distance change per scroll line
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = finite_or(speed, self.zoom_speed, "zoom speed");
        self
    }

    /// Builder: set how far the vertical angle stays from the poles
    ///
    /// Clamped to (0, π/2) so the band never collapses or reaches a pole.
    pub fn with_pole_margin(mut self, margin: f32) -> Self {
        self.pole_margin =
            finite_or(margin, self.pole_margin, "pole margin").clamp(1e-3, FRAC_PI_2 - 1e-3);
        self.orbit.vertical = self.clamp_vertical(self.orbit.vertical);
        self.home.vertical = self.clamp_vertical(self.home.vertical);
        self
    }

    /// Builder: set zoom limits; the minimum is forced positive
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = finite_or(min, self.min_distance, "min distance").max(1e-3);
        self.max_distance = finite_or(max, self.max_distance, "max distance").max(self.min_distance);
        self.orbit.distance = self.orbit.distance.clamp(self.min_distance, self.max_distance);
        self.home.distance = self.home.distance.clamp(self.min_distance, self.max_distance);
        self
    }
}

impl InputListener for CameraController {
    fn key_down(&mut self, key: KeyCode) {
        self.on_key_down(key);
    }

    fn key_up(&mut self, key: KeyCode) {
        self.on_key_up(key);
    }

    /// Background drag always belongs to the camera
    fn pointer_down(&mut self, event: &PointerEvent) -> Propagation {
        self.on_pointer_down(event.position.x, event.position.y);
        Propagation::Stop
    }

    fn pointer_move(&mut self, event: &PointerEvent) {
        self.on_pointer_move(event.position.x, event.position.y);
    }

    fn pointer_up(&mut self, _event: &PointerEvent) {
        self.on_pointer_up();
    }

    fn scroll(&mut self, lines: f32) {
        self.on_scroll(lines);
    }
}
