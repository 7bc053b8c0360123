//! Logical input state.
//! The host translates keyboard and touch into press/release events for the
//! three logical actions; the simulation samples the resulting booleans once
//! per frame and never sees device details.

/// A logical player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

/// A state change for one action, pushed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// Current held state of the three actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        let (action, held) = match event {
            InputEvent::Pressed(a) => (a, true),
            InputEvent::Released(a) => (a, false),
        };
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Jump => self.jump = held,
        }
    }

    /// Release everything. Called on focus loss and on resume from pause so
    /// stale held keys cannot produce residual motion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
