//! Raw input state shared by the controllers
//!
//! Held navigation keys live in a [`NavKeys`] bitset; pointer events carry
//! their screen position and the surface the host's picking resolved them to.

use bitflags::bitflags;
use discrig_math::Vec2;
use winit::keyboard::KeyCode;

bitflags! {
    /// Movement intents currently held down
    ///
    /// Pan directions are relative to the camera heading, not world axes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NavKeys: u8 {
        /// Strafe left (ArrowLeft / A)
        const PAN_LEFT = 1 << 0;
        /// Strafe right (ArrowRight / D)
        const PAN_RIGHT = 1 << 1;
        /// Move away from the camera (ArrowUp / W)
        const PAN_FORWARD = 1 << 2;
        /// Move toward the camera (ArrowDown / S)
        const PAN_BACK = 1 << 3;
    }
}

impl NavKeys {
    /// Map a physical key to its navigation intent
    ///
    /// Returns `None` for keys that do not steer the camera.
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Self::PAN_LEFT),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Self::PAN_RIGHT),
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::PAN_FORWARD),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::PAN_BACK),
            _ => None,
        }
    }

    /// Signed axis value: +1 when only `positive` is held, -1 when only
    /// `negative` is held, 0 when neither or both are.
    pub fn axis(self, positive: Self, negative: Self) -> f32 {
        (self.contains(positive) as i32 - self.contains(negative) as i32) as f32
    }
}

/// `value` if finite, otherwise `fallback` (with a warning naming `what`)
///
/// Tuning values arrive from config files and env vars, where `nan` and
/// `inf` are valid floats; a NaN bound would make `f32::clamp` panic.
pub(crate) fn finite_or(value: f32, fallback: f32, what: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("Ignoring non-finite {} ({}), keeping {}", what, value, fallback);
        fallback
    }
}

/// Which scene surface a pointer-down landed on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerTarget {
    /// The spinning disc's face
    Disc,
    /// Anything else (sky, floor)
    #[default]
    Background,
}

/// A pointer event in screen coordinates (pixels, origin top-left)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, target: PointerTarget) -> Self {
        Self {
            position: Vec2::new(x, y),
            target,
        }
    }

    /// Pointer event over the background
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerTarget::Background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_rejects_nan_and_infinity() {
        assert_eq!(finite_or(0.3, 1.0, "x"), 0.3);
        assert_eq!(finite_or(f32::NAN, 1.0, "x"), 1.0);
        assert_eq!(finite_or(f32::INFINITY, 1.0, "x"), 1.0);
        assert_eq!(finite_or(f32::NEG_INFINITY, -2.0, "x"), -2.0);
    }

    #[test]
    fn test_arrow_keys_map_to_intents() {
        assert_eq!(NavKeys::from_key_code(KeyCode::ArrowLeft), Some(NavKeys::PAN_LEFT));
        assert_eq!(NavKeys::from_key_code(KeyCode::ArrowRight), Some(NavKeys::PAN_RIGHT));
        assert_eq!(NavKeys::from_key_code(KeyCode::ArrowUp), Some(NavKeys::PAN_FORWARD));
        assert_eq!(NavKeys::from_key_code(KeyCode::ArrowDown), Some(NavKeys::PAN_BACK));
    }

    #[test]
    fn test_unrelated_keys_unmapped() {
        for key in [KeyCode::KeyQ, KeyCode::Space, KeyCode::Escape, KeyCode::KeyR] {
            assert_eq!(NavKeys::from_key_code(key), None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_axis_cancels_opposites() {
        let held = NavKeys::PAN_FORWARD | NavKeys::PAN_BACK | NavKeys::PAN_RIGHT;
        assert_eq!(held.axis(NavKeys::PAN_FORWARD, NavKeys::PAN_BACK), 0.0);
        assert_eq!(held.axis(NavKeys::PAN_RIGHT, NavKeys::PAN_LEFT), 1.0);
        assert_eq!(NavKeys::empty().axis(NavKeys::PAN_RIGHT, NavKeys::PAN_LEFT), 0.0);
        assert_eq!(NavKeys::PAN_LEFT.axis(NavKeys::PAN_RIGHT, NavKeys::PAN_LEFT), -1.0);
    }
}
