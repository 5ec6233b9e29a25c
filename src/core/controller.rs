use serde::{Deserialize, Serialize};

/// Platform-neutral key identifier, named after DOM `KeyboardEvent.code` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    ShiftLeft,
    ShiftRight,
    Escape,
}

/// Logical navigation intent a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    LookLeft,
    LookRight,
    LookUp,
    LookDown,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::MoveForward,
        Intent::MoveBackward,
        Intent::StrafeLeft,
        Intent::StrafeRight,
        Intent::LookLeft,
        Intent::LookRight,
        Intent::LookUp,
        Intent::LookDown,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Controller - read-only view of held intents
pub trait Controller {
    /// Check if intent is currently held
    fn is_held(&self, intent: Intent) -> bool;

    /// +1 when only `positive` is held, -1 when only `negative` is, 0 otherwise
    fn axis(&self, positive: Intent, negative: Intent) -> f32 {
        match (self.is_held(positive), self.is_held(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Per-frame input snapshot: held intents plus the look delta gathered since
/// the previous snapshot (in pixels, screen space)
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    held: [bool; 8],
    pub look_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and benches to hold intents directly
    pub fn holding(intents: &[Intent]) -> Self {
        let mut state = Self::default();
        for &intent in intents {
            state.set(intent, true);
        }
        state
    }

    pub fn with_look_delta(mut self, dx: f32, dy: f32) -> Self {
        self.look_delta = (dx, dy);
        self
    }

    pub fn set(&mut self, intent: Intent, held: bool) {
        self.held[intent.index()] = held;
    }

    /// True when nothing is held and there is no look delta
    pub fn is_idle(&self) -> bool {
        !self.held.iter().any(|&h| h) && self.look_delta == (0.0, 0.0)
    }
}

impl Controller for InputState {
    fn is_held(&self, intent: Intent) -> bool {
        self.held[intent.index()]
    }
}
