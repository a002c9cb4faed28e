//! discrig - orbit camera and drag-to-spin disc
//!
//! Library half of the application: configuration, pointer picking, the
//! scene target the per-frame poses flow into, and the frame scheduler.
//! The binary wires these to a winit event loop.

pub mod config;
pub mod input;
pub mod picking;
pub mod systems;
pub mod target;

pub use config::{AppConfig, ConfigError};
pub use systems::{FrameOutput, FrameScheduler};
pub use target::{SceneSink, SceneTarget};
