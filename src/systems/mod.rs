//! Application systems
//!
//! Frame scheduling and window handling, kept out of main.rs so they can be
//! tested without an event loop.

mod frame;
mod window;

pub use frame::{FrameOutput, FrameScheduler, CAMERA_PRIORITY, DISC_PRIORITY};
pub use window::{WindowError, WindowSystem};
