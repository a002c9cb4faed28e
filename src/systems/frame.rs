//! Frame scheduler
//!
//! The single per-frame entry point. Each `step`:
//! - Advances the camera controller (held keys → pan, then placement)
//! - Advances the disc spin controller (decay, then angle)
//! - Forwards both results to the scene target
//!
//! Input events reach the controllers through the [`InputHub`] between
//! steps; the scheduler owns the subscription that wires them up.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use discrig_input::{CameraController, CameraPose, DiscSpinController, InputHub, Subscription};
use discrig_math::{Pose, Vec3};

use crate::target::SceneTarget;

/// Disc listeners see pointer-downs before the camera
pub const DISC_PRIORITY: i32 = 10;
pub const CAMERA_PRIORITY: i32 = 0;

/// What one step produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    /// Index of this step, starting at 0
    pub frame: u64,
    pub camera: CameraPose,
    pub disc_pose: Pose,
    /// Disc angular velocity after this step (radians per tick)
    pub angular_velocity: f32,
}

/// Drives the camera and disc controllers once per rendered frame
pub struct FrameScheduler {
    camera: Rc<RefCell<CameraController>>,
    disc: Rc<RefCell<DiscSpinController>>,
    disc_position: Vec3,
    subscription: Option<Subscription>,
    last_time: Option<f64>,
    frame: u64,
}

impl FrameScheduler {
    /// Create a scheduler for a disc centered at `disc_position`
    pub fn new(camera: CameraController, disc: DiscSpinController, disc_position: Vec3) -> Self {
        Self {
            camera: Rc::new(RefCell::new(camera)),
            disc: Rc::new(RefCell::new(disc)),
            disc_position,
            subscription: None,
            last_time: None,
            frame: 0,
        }
    }

    /// Subscribe both controllers to `hub` under one subscription
    ///
    /// Attaching again replaces the previous subscription.
    pub fn attach(&mut self, hub: &InputHub) {
        let subscription = hub
            .subscribe(Rc::clone(&self.disc), DISC_PRIORITY)
            .join(hub.subscribe(Rc::clone(&self.camera), CAMERA_PRIORITY));
        self.subscription = Some(subscription);
        log::debug!("Frame scheduler attached ({} listeners)", hub.listener_count());
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Unregister every listener this scheduler attached
    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            log::debug!("Frame scheduler detached");
        }
    }

    /// Advance one frame at `time_secs` and forward the results to `target`
    ///
    /// Time should increase monotonically; a repeated or earlier timestamp is
    /// logged and the frame still runs, since controllers advance per tick.
    pub fn step(&mut self, time_secs: f64, target: &mut dyn SceneTarget) -> FrameOutput {
        if let Some(last) = self.last_time {
            if time_secs <= last {
                log::warn!(
                    "Non-monotonic frame time: {:.4}s after {:.4}s",
                    time_secs,
                    last
                );
            }
        }
        self.last_time = Some(time_secs);

        let camera = self.camera.borrow_mut().tick();
        let orientation = self.disc.borrow_mut().tick();
        let disc_pose = Pose::new(self.disc_position, orientation);

        target.apply_camera(&camera);
        target.apply_kinematic_pose(&disc_pose);

        let output = FrameOutput {
            frame: self.frame,
            camera,
            disc_pose,
            angular_velocity: self.disc.borrow().angular_velocity(),
        };
        log::trace!(
            "Frame {}: camera {:?}, disc angle {:.4}",
            output.frame,
            camera.position,
            self.disc.borrow().angle()
        );
        self.frame += 1;
        output
    }

    /// Put the camera back on its starting orbit
    pub fn reset_camera(&mut self) {
        self.camera.borrow_mut().reset();
        log::info!("Camera reset to starting orbit");
    }

    pub fn camera(&self) -> Ref<'_, CameraController> {
        self.camera.borrow()
    }

    pub fn disc(&self) -> Ref<'_, DiscSpinController> {
        self.disc.borrow()
    }

    /// Disc pose for the current spin, without advancing
    pub fn disc_pose(&self) -> Pose {
        Pose::new(self.disc_position, self.disc.borrow().orientation())
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}
