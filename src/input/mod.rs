//! Special-key handling
//!
//! Navigation and pointer input go through the input hub; this module only
//! maps the keys that act on the application itself.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
