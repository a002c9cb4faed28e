//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`DISCRIG_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use discrig_input::{CameraController, DiscSpinController};
use discrig_math::{Quat, Vec3};
use discrig_physics::{BallSpec, DiscGeometry};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Disc spin configuration
    #[serde(default)]
    pub spin: SpinConfig,
    /// Disc placement and dimensions
    #[serde(default)]
    pub disc: DiscConfig,
    /// Physics scene configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`DISCRIG_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // DISCRIG_SPIN__DECAY=0.95 -> spin.decay = 0.95
        figment = figment.merge(Env::prefixed("DISCRIG_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Camera controller orbiting the disc
    pub fn camera_controller(&self) -> CameraController {
        self.camera.to_controller(self.disc.position())
    }

    /// Spin controller with the disc's tilt
    pub fn spin_controller(&self) -> DiscSpinController {
        self.spin.to_controller(self.disc.tilt())
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "discrig - Spinning Disc".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting heading in radians
    pub start_horizontal: f32,
    /// Starting elevation in radians
    pub start_vertical: f32,
    /// Starting distance from the disc
    pub distance: f32,
    /// Closest zoom
    pub min_distance: f32,
    /// Farthest zoom
    pub max_distance: f32,
    /// Distance per scroll line
    pub zoom_speed: f32,
    /// Gap kept between the elevation limit and the poles (radians)
    pub pole_margin: f32,
    /// Heading change per pixel of drag
    pub horizontal_sensitivity: f32,
    /// Elevation change per pixel of drag
    pub vertical_sensitivity: f32,
    /// Pan distance per frame while a key is held
    pub pan_speed: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_horizontal: 0.0,
            start_vertical: 0.0,
            distance: 10.0,
            min_distance: 2.0,
            max_distance: 50.0,
            zoom_speed: 0.5,
            pole_margin: 0.1,
            horizontal_sensitivity: 0.005,
            vertical_sensitivity: 0.005,
            pan_speed: 0.1,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Build a camera controller orbiting `anchor`
    pub fn to_controller(&self, anchor: Vec3) -> CameraController {
        CameraController::new()
            .with_anchor(anchor)
            .with_distance_limits(self.min_distance, self.max_distance)
            .with_pole_margin(self.pole_margin)
            .with_orbit(self.start_horizontal, self.start_vertical, self.distance)
            .with_sensitivity(self.horizontal_sensitivity, self.vertical_sensitivity)
            .with_pan_speed(self.pan_speed)
            .with_zoom_speed(self.zoom_speed)
    }
}

/// Disc spin configuration (rates are per frame)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Resting angular velocity in radians per frame
    pub base_spin: f32,
    /// Fraction of the excess velocity kept each frame
    pub decay: f32,
    /// Angular velocity per pixel of horizontal drag
    pub drag_gain: f32,
    /// Bound on drag-induced velocity; unset keeps flicks unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_drag_velocity: Option<f32>,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            base_spin: -0.005,
            decay: 0.98,
            drag_gain: 0.001,
            max_drag_velocity: None,
        }
    }
}

impl SpinConfig {
    pub fn to_controller(&self, tilt: Quat) -> DiscSpinController {
        DiscSpinController::new()
            .with_base_spin(self.base_spin)
            .with_decay(self.decay)
            .with_drag_gain(self.drag_gain)
            .with_max_drag_velocity(self.max_drag_velocity)
            .with_tilt(tilt)
    }
}

/// Disc placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscConfig {
    /// Disc center [x, y, z]; also the camera's orbit anchor
    pub position: [f32; 3],
    /// Rest tilt about world X in degrees (90 stands the disc upright)
    pub tilt_degrees: f32,
    /// Visual dimensions the collision shell is derived from
    pub geometry: DiscGeometry,
}

impl Default for DiscConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, -8.0],
            tilt_degrees: 90.0,
            geometry: DiscGeometry::default(),
        }
    }
}

impl DiscConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn tilt(&self) -> Quat {
        Quat::from_rotation_x(self.tilt_degrees.to_radians())
    }
}

/// Physics scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector [x, y, z]
    pub gravity: [f32; 3],
    /// Ball spawn points relative to the disc center
    pub ball_offsets: Vec<[f32; 3]>,
    /// Shared ball parameters
    pub ball: BallSpec,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            ball_offsets: vec![[0.0, 0.0, 0.2]],
            ball: BallSpec::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` wins
    pub log_level: String,
    /// Show camera position and spin rate in the window title
    pub title_telemetry: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            title_telemetry: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.spin.decay, 0.98);
        assert_eq!(config.disc.position, [0.0, 2.0, -8.0]);
        assert!(config.spin.max_drag_velocity.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("base_spin"));
        assert!(toml.contains("restitution"));
        assert!(!toml.contains("max_drag_velocity"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[spin]\ndecay = 0.9\n"))
            .extract()
            .unwrap();
        assert_eq!(config.spin.decay, 0.9);
        assert_eq!(config.spin.base_spin, -0.005);
        assert_eq!(config.camera.distance, 10.0);
    }

    #[test]
    fn test_controllers_follow_config() {
        let mut config = AppConfig::default();
        config.camera.distance = 12.0;
        config.spin.max_drag_velocity = Some(0.2);

        let camera = config.camera_controller();
        assert_eq!(camera.orbit().distance, 12.0);
        assert_eq!(camera.anchor_point(), Vec3::new(0.0, 2.0, -8.0));

        let spin = config.spin_controller();
        assert_eq!(spin.max_drag_velocity, Some(0.2));
        assert_eq!(spin.angular_velocity(), -0.005);
    }

    #[test]
    fn test_disc_tilt_stands_disc_upright() {
        let tilt = DiscConfig::default().tilt();
        let normal = tilt.rotate(Vec3::Y);
        assert!((normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_nan_values_from_toml_fall_back() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string(
                "[camera]\npole_margin = nan\ndistance = nan\n[spin]\ndecay = nan\n",
            ))
            .extract()
            .unwrap();
        assert!(config.camera.pole_margin.is_nan());

        let mut camera = config.camera_controller();
        camera.on_pointer_down(0.0, 0.0);
        camera.on_pointer_move(0.0, 500.0);
        assert!(camera.orbit().vertical.is_finite());
        assert_eq!(camera.orbit().distance, 10.0);

        let mut spin = config.spin_controller();
        assert_eq!(spin.decay(), 0.98);
        spin.tick();
        assert!(spin.angular_velocity().is_finite());
    }
}
