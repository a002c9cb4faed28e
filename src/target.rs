//! Scene target: where per-frame poses go
//!
//! The frame scheduler hands the camera placement and the disc's kinematic
//! pose to a [`SceneTarget`] every frame. [`SceneSink`] is the stock target:
//! it mirrors the disc pose into the physics scene and remembers the camera
//! for picking and telemetry.

use discrig_input::CameraPose;
use discrig_math::{Pose, Vec3};
use discrig_physics::{BodyKey, PhysicsError, PhysicsScene};

use crate::config::AppConfig;

/// Consumer of the poses computed each frame
pub trait SceneTarget {
    /// Camera position and look-at point for this frame
    fn apply_camera(&mut self, camera: &CameraPose);

    /// Pose of the spinning disc for this frame
    fn apply_kinematic_pose(&mut self, pose: &Pose);
}

/// Physics-backed scene target
pub struct SceneSink {
    physics: PhysicsScene,
    disc: BodyKey,
    balls: Vec<BodyKey>,
    camera: Option<CameraPose>,
    rejected_poses: u64,
}

impl SceneSink {
    /// Wrap an existing physics scene whose disc body is `disc`
    pub fn new(physics: PhysicsScene, disc: BodyKey) -> Self {
        Self {
            physics,
            disc,
            balls: Vec::new(),
            camera: None,
            rejected_poses: 0,
        }
    }

    /// Build the physics scene from config: the kinematic disc at its rest
    /// pose plus one ball per configured spawn offset
    pub fn from_config(config: &AppConfig) -> Result<Self, PhysicsError> {
        let mut physics = PhysicsScene::new(config.physics.gravity());
        let center = config.disc.position();
        let rest = Pose::new(center, config.disc.tilt());
        let disc = physics.add_disc(rest, &config.disc.geometry);

        let mut balls = Vec::with_capacity(config.physics.ball_offsets.len());
        for offset in &config.physics.ball_offsets {
            let position = center + Vec3::from_array(*offset);
            balls.push(physics.add_ball_in_disc(disc, position, &config.physics.ball)?);
        }

        log::info!(
            "Physics scene ready: 1 disc, {} ball(s), gravity {:?}",
            balls.len(),
            physics.gravity()
        );

        Ok(Self {
            balls,
            ..Self::new(physics, disc)
        })
    }

    pub fn physics(&self) -> &PhysicsScene {
        &self.physics
    }

    pub fn disc(&self) -> BodyKey {
        self.disc
    }

    pub fn balls(&self) -> &[BodyKey] {
        &self.balls
    }

    /// Disc pose as the physics scene currently holds it
    pub fn disc_pose(&self) -> Option<Pose> {
        self.physics.kinematic_pose(self.disc)
    }

    /// Last camera placement received
    pub fn camera(&self) -> Option<&CameraPose> {
        self.camera.as_ref()
    }

    /// Number of poses the physics scene refused
    pub fn rejected_poses(&self) -> u64 {
        self.rejected_poses
    }
}

impl SceneTarget for SceneSink {
    fn apply_camera(&mut self, camera: &CameraPose) {
        self.camera = Some(*camera);
    }

    fn apply_kinematic_pose(&mut self, pose: &Pose) {
        // No retry: the next frame brings a fresh pose anyway
        if let Err(e) = self.physics.set_kinematic_pose(self.disc, *pose) {
            self.rejected_poses += 1;
            log::warn!("Physics scene rejected disc pose: {}", e);
        }
    }
}
