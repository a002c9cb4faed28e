//! Disc spin controller
//!
//! The disc spins about its own axis. Dragging sets the angular velocity
//! from the latest horizontal pointer delta; releasing keeps that velocity
//! as momentum, which then relaxes back to the resting spin rate:
//!
//! ```text
//! velocity = velocity * decay + base_spin * (1 - decay)
//! ```
//!
//! The angle is integrated once per tick (explicit Euler, step of one frame).

use std::f32::consts::{FRAC_PI_2, TAU};

use discrig_math::Quat;

use crate::hub::{InputListener, Propagation};
use crate::input_state::{finite_or, PointerEvent, PointerTarget};

/// Which input governs the angular velocity this tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpinMode {
    /// Velocity relaxes toward the base spin rate
    Autospin,
    /// Velocity follows pointer deltas; tick leaves it alone
    Dragging { last_pointer_x: f32 },
}

/// Integrated spin of the disc
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinState {
    /// Accumulated rotation about the spin axis (radians, never wrapped)
    pub angle: f32,
    /// Radians per tick, signed
    pub angular_velocity: f32,
    pub mode: SpinMode,
}

impl SpinState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, SpinMode::Dragging { .. })
    }
}

/// Disc spin controller
pub struct DiscSpinController {
    state: SpinState,

    // Configuration
    /// Resting angular velocity (radians per tick)
    pub base_spin: f32,
    /// Fraction of the velocity offset kept each tick, in [0, 1)
    decay: f32,
    /// Radians per tick per pixel of drag
    pub drag_gain: f32,
    /// Optional bound on drag-induced velocity; `None` leaves flicks unbounded
    pub max_drag_velocity: Option<f32>,
    /// Rest orientation the spin is applied on top of
    pub tilt: Quat,
}

impl Default for DiscSpinController {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscSpinController {
    pub fn new() -> Self {
        let base_spin = -0.005;
        Self {
            state: SpinState {
                angle: 0.0,
                angular_velocity: base_spin,
                mode: SpinMode::Autospin,
            },
            base_spin,
            decay: 0.98,
            drag_gain: 0.001,
            max_drag_velocity: None,
            // Disc modelled with +Y normal, stood upright to face +Z
            tilt: Quat::from_rotation_x(FRAC_PI_2),
        }
    }

    /// Start dragging at horizontal pointer position `x`
    pub fn on_pointer_down(&mut self, x: f32) {
        self.state.mode = SpinMode::Dragging { last_pointer_x: x };
        log::debug!("Disc drag started at x={:.0}", x);
    }

    /// Set velocity from the delta since the last sample (Dragging only)
    pub fn on_pointer_move(&mut self, x: f32) {
        let SpinMode::Dragging { last_pointer_x } = self.state.mode else {
            return;
        };
        if !x.is_finite() {
            return;
        }
        let mut velocity = (x - last_pointer_x) * self.drag_gain;
        if let Some(max) = self.max_drag_velocity.filter(|m| !m.is_nan()) {
            velocity = velocity.clamp(-max, max);
        }
        self.state.angular_velocity = velocity;
        self.state.mode = SpinMode::Dragging { last_pointer_x: x };
    }

    /// Release; the last drag velocity carries over as momentum
    pub fn on_pointer_up(&mut self) {
        if self.state.is_dragging() {
            log::debug!(
                "Disc released with angular velocity {:.4} rad/tick",
                self.state.angular_velocity
            );
        }
        self.state.mode = SpinMode::Autospin;
    }

    /// Advance one frame and return the disc orientation
    pub fn tick(&mut self) -> Quat {
        if self.state.mode == SpinMode::Autospin {
            self.state.angular_velocity =
                self.state.angular_velocity * self.decay + self.base_spin * (1.0 - self.decay);
        }
        self.state.angle += self.state.angular_velocity;
        self.orientation()
    }

    /// Tilt composed with the current spin about the disc's local Y axis
    pub fn orientation(&self) -> Quat {
        // Reduce first: large accumulated angles lose precision in sin/cos
        let spin = Quat::from_rotation_y(self.state.angle.rem_euclid(TAU));
        self.tilt.compose(&spin).normalize()
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn angle(&self) -> f32 {
        self.state.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.state.angular_velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Builder: set the resting spin rate (also the starting velocity)
    pub fn with_base_spin(mut self, base_spin: f32) -> Self {
        self.base_spin = finite_or(base_spin, self.base_spin, "base spin");
        self.state.angular_velocity = self.base_spin;
        self
    }

    /// Builder: set the per-tick decay factor, kept inside [0, 1)
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = finite_or(decay, self.decay, "spin decay").clamp(0.0, 0.9999);
        self
    }

    /// Builder: set velocity per pixel of drag
    pub fn with_drag_gain(mut self, gain: f32) -> Self {
        self.drag_gain = finite_or(gain, self.drag_gain, "drag gain");
        self
    }

    /// Builder: bound drag-induced velocity magnitude
    pub fn with_max_drag_velocity(mut self, max: Option<f32>) -> Self {
        // Infinity is a valid "no bound"; NaN is not a bound at all
        self.max_drag_velocity = max.filter(|m| !m.is_nan()).map(f32::abs);
        self
    }

    /// Builder: set the rest orientation
    pub fn with_tilt(mut self, tilt: Quat) -> Self {
        self.tilt = tilt.normalize();
        self
    }

    /// Builder: start with a specific velocity instead of the base spin
    pub fn with_angular_velocity(mut self, velocity: f32) -> Self {
        self.state.angular_velocity =
            finite_or(velocity, self.state.angular_velocity, "angular velocity");
        self
    }
}

impl InputListener for DiscSpinController {
    /// Claims pointer-downs that land on the disc so the camera never
    /// starts an orbit drag from the disc surface
    fn pointer_down(&mut self, event: &PointerEvent) -> Propagation {
        if event.target != PointerTarget::Disc {
            return Propagation::Continue;
        }
        self.on_pointer_down(event.position.x);
        Propagation::Stop
    }

    fn pointer_move(&mut self, event: &PointerEvent) {
        self.on_pointer_move(event.position.x);
    }

    fn pointer_up(&mut self, _event: &PointerEvent) {
        self.on_pointer_up();
    }
}
