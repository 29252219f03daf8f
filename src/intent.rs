//! Movement intent component.
//!
//! Intents represent the desired movement direction from player input or AI.
//! The controller reads these intents once per tick and never writes them
//! back, except to consume the jump trigger.

use bevy::prelude::*;

/// Magnitude below which an intent axis counts as "no input".
pub const DEAD_ZONE: f32 = 0.1;

/// Directional intent plus a discrete jump trigger.
///
/// # Example
///
/// ```rust
/// use curve_locomotion::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_lateral(1.0);
/// assert!(intent.has_lateral_input());
///
/// // Jump is edge-triggered: holding the button only jumps once.
/// intent.set_jump_pressed(true);
/// assert!(intent.take_jump_request());
/// intent.set_jump_pressed(true);
/// assert!(!intent.take_jump_request());
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Lateral intent (-1.0 = left, 1.0 = right).
    pub lateral: f32,
    /// Secondary-axis intent. Orbiting entities read it as tangential speed
    /// along the arc. Not clamped: the targeting heuristic may exceed 1.0 and
    /// the velocity model bounds the result.
    pub secondary: f32,
    /// Whether the jump action is currently held.
    ///
    /// A jump is requested when this changes from `false` to `true`.
    pub jump_pressed: bool,
    /// Previous tick's `jump_pressed` (for edge detection).
    pub(crate) jump_pressed_prev: bool,
    /// One-shot request that does not depend on a held button (AI, scripts).
    pub(crate) jump_requested: bool,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lateral direction (-1.0 = left, 1.0 = right).
    pub fn set_lateral(&mut self, direction: f32) {
        self.lateral = direction.clamp(-1.0, 1.0);
    }

    /// Set the secondary-axis intent.
    pub fn set_secondary(&mut self, value: f32) {
        self.secondary = value;
    }

    /// Set both axes from a vector (`x` lateral, `y` secondary).
    pub fn set_axes(&mut self, axes: Vec2) {
        self.set_lateral(axes.x);
        self.set_secondary(axes.y);
    }

    /// Both axes as a vector.
    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.lateral, self.secondary)
    }

    /// Clear both axes. A pending jump is kept.
    pub fn clear(&mut self) {
        self.lateral = 0.0;
        self.secondary = 0.0;
    }

    /// Check if the lateral axis is outside the dead zone.
    pub fn has_lateral_input(&self) -> bool {
        self.lateral.abs() > DEAD_ZONE
    }

    /// Check if the secondary axis is outside the dead zone.
    pub fn has_secondary_input(&self) -> bool {
        self.secondary.abs() > DEAD_ZONE
    }

    /// Set the jump button state. Call this every frame with the current state.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Check if jump is currently held.
    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    /// Request a single jump regardless of the button state.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Check if a jump would be triggered by the next [`take_jump_request`](Self::take_jump_request).
    pub fn has_jump_request(&self) -> bool {
        self.jump_requested || (self.jump_pressed && !self.jump_pressed_prev)
    }

    /// Consume the jump trigger.
    ///
    /// Returns true on the rising edge of `jump_pressed` or after
    /// [`request_jump`](Self::request_jump). Called once per tick by the
    /// controller; a request made while airborne is dropped, not buffered.
    pub fn take_jump_request(&mut self) -> bool {
        let triggered = self.has_jump_request();
        self.jump_pressed_prev = self.jump_pressed;
        self.jump_requested = false;
        triggered
    }
}
