//! Input handling for the spinning-disc scene
//!
//! This crate turns raw key and pointer events into per-frame motion:
//!
//! - [`CameraController`] - orbit/pan/zoom camera around an anchor
//! - [`DiscSpinController`] - drag-to-spin disc with decaying momentum
//! - [`InputHub`] - event source with scoped [`Subscription`]s

mod camera_controller;
mod hub;
mod input_state;
mod spin_controller;

pub use camera_controller::{CameraController, CameraDrag, CameraPose, OrbitState};
pub use hub::{InputEvent, InputHub, InputListener, Propagation, Subscription};
pub use input_state::{NavKeys, PointerEvent, PointerTarget};
pub use spin_controller::{DiscSpinController, SpinMode, SpinState};
