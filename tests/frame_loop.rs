//! Integration tests for the frame loop
//!
//! Drives the scheduler the way the window loop does: events through the
//! hub, one step per frame, poses into the physics-backed scene sink.

use discrig::config::AppConfig;
use discrig::picking::{self, Projection};
use discrig::systems::FrameScheduler;
use discrig::target::SceneSink;
use discrig_input::{InputEvent, InputHub, PointerEvent, PointerTarget};
use discrig_math::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

struct Harness {
    hub: InputHub,
    frames: FrameScheduler,
    sink: SceneSink,
    config: AppConfig,
    time: f64,
}

impl Harness {
    fn new() -> Self {
        let config = AppConfig::default();
        let hub = InputHub::new();
        let mut frames = FrameScheduler::new(
            config.camera_controller(),
            config.spin_controller(),
            config.disc.position(),
        );
        frames.attach(&hub);
        let sink = SceneSink::from_config(&config).unwrap();
        Self {
            hub,
            frames,
            sink,
            config,
            time: 0.0,
        }
    }

    fn step(&mut self) -> discrig::FrameOutput {
        self.time += 1.0 / 60.0;
        self.frames.step(self.time, &mut self.sink)
    }

    /// Press at a screen position, tagged the way the window loop tags it
    fn press(&self, x: f32, y: f32) -> PointerTarget {
        let target = picking::pick_target(
            &self.frames.camera().pose(),
            &Projection::default(),
            VIEWPORT,
            Vec2::new(x, y),
            &self.frames.disc_pose(),
            &self.config.disc.geometry,
        );
        self.hub
            .dispatch(&InputEvent::PointerDown(PointerEvent::new(x, y, target)));
        target
    }

    fn drag_to(&self, x: f32, y: f32, target: PointerTarget) {
        self.hub
            .dispatch(&InputEvent::PointerMove(PointerEvent::new(x, y, target)));
    }

    fn release(&self, x: f32, y: f32, target: PointerTarget) {
        self.hub
            .dispatch(&InputEvent::PointerUp(PointerEvent::new(x, y, target)));
    }
}

#[test]
fn test_physics_pose_matches_spin_output() {
    let mut h = Harness::new();
    for _ in 0..30 {
        let output = h.step();
        let physics_pose = h.sink.disc_pose().unwrap();
        assert_eq!(physics_pose, output.disc_pose);
        assert_eq!(physics_pose.position, Vec3::new(0.0, 2.0, -8.0));
    }
    assert_eq!(h.sink.physics().kinematic_updates(), 30);
    assert_eq!(h.sink.rejected_poses(), 0);
}

#[test]
fn test_orientation_is_tilt_then_spin() {
    let mut h = Harness::new();
    let output = h.step();
    let angle = h.frames.disc().angle();
    let expected = Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_y(angle);
    assert!(output.disc_pose.orientation.same_rotation(&expected, 1e-5));
}

#[test]
fn test_press_on_disc_spins_disc_not_camera() {
    let mut h = Harness::new();
    h.step();
    let orbit_before = *h.frames.camera().orbit();

    let target = h.press(640.0, 360.0);
    assert_eq!(target, PointerTarget::Disc);
    h.drag_to(700.0, 380.0, target);
    let output = h.step();
    h.release(700.0, 380.0, target);

    assert!((output.angular_velocity - 0.06).abs() < 1e-6);
    assert_eq!(*h.frames.camera().orbit(), orbit_before);
}

#[test]
fn test_flick_momentum_relaxes_after_release() {
    let mut h = Harness::new();
    let target = h.press(640.0, 360.0);
    h.drag_to(840.0, 360.0, target);
    h.release(840.0, 360.0, target);

    let first = h.step().angular_velocity;
    assert!(first > 0.15);
    let mut last = first;
    for _ in 0..200 {
        let v = h.step().angular_velocity;
        assert!(v < last);
        last = v;
    }
    assert!((last - (-0.005)).abs() < (first - (-0.005)).abs() * 0.02);
}

#[test]
fn test_press_on_background_orbits_camera() {
    let mut h = Harness::new();
    let target = h.press(20.0, 20.0);
    assert_eq!(target, PointerTarget::Background);
    h.drag_to(120.0, 60.0, target);
    h.release(120.0, 60.0, target);
    let output = h.step();

    let orbit = *h.frames.camera().orbit();
    assert!((orbit.horizontal - (-0.5)).abs() < 1e-5);
    assert!((orbit.vertical - 0.2).abs() < 1e-5);
    assert!(!h.frames.disc().is_dragging());
    // Still looking at the disc
    assert_eq!(output.camera.target, Vec3::new(0.0, 2.0, -8.0));
}

#[test]
fn test_teardown_stops_all_listeners() {
    let mut h = Harness::new();
    h.frames.teardown();
    assert_eq!(h.hub.listener_count(), 0);

    let target = h.press(640.0, 360.0);
    h.drag_to(900.0, 100.0, target);
    h.hub
        .dispatch(&InputEvent::KeyDown(winit::keyboard::KeyCode::KeyW));
    h.hub.dispatch(&InputEvent::Scroll(3.0));
    let output = h.step();

    assert!(!h.frames.disc().is_dragging());
    assert!(h.frames.camera().held_keys().is_empty());
    assert_eq!(h.frames.camera().orbit().distance, 10.0);
    assert!((output.angular_velocity - (-0.005)).abs() < 1e-7);
}

#[test]
fn test_reset_restores_camera_after_pan_and_zoom() {
    let mut h = Harness::new();
    h.hub
        .dispatch(&InputEvent::KeyDown(winit::keyboard::KeyCode::KeyD));
    h.hub.dispatch(&InputEvent::Scroll(2.0));
    for _ in 0..10 {
        h.step();
    }
    h.hub
        .dispatch(&InputEvent::KeyUp(winit::keyboard::KeyCode::KeyD));
    assert!(h.frames.camera().orbit().offset.x > 0.9);
    assert_eq!(h.frames.camera().orbit().distance, 9.0);

    h.frames.reset_camera();
    let output = h.step();
    assert!((output.camera.position - Vec3::new(0.0, 2.0, 2.0)).length() < 1e-5);
}
