//! Input state tracking.
//!
//! Host event handlers feed key and pointer events into an [`InputTracker`];
//! the frame driver takes one [`InputState`] snapshot per frame. Everything
//! here runs on the event-loop thread, so no locking is involved.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::controller::{Controller, InputState, Intent, Key};

/// Static key -> intent table. Several keys may share one intent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: HashMap<Key, Intent>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, intent: Intent, keys: &[Key]) -> Self {
        for &key in keys {
            self.bindings.insert(key, intent);
        }
        self
    }

    pub fn intent(&self, key: Key) -> Option<Intent> {
        self.bindings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// WASD or arrows to move; looking is done with the pointer
    pub fn pointer_look() -> Self {
        Self::new()
            .bind(Intent::MoveForward, &[Key::KeyW, Key::ArrowUp])
            .bind(Intent::MoveBackward, &[Key::KeyS, Key::ArrowDown])
            .bind(Intent::StrafeLeft, &[Key::KeyA, Key::ArrowLeft])
            .bind(Intent::StrafeRight, &[Key::KeyD, Key::ArrowRight])
    }

    /// WASD to move, arrows to look
    pub fn key_look() -> Self {
        Self::new()
            .bind(Intent::MoveForward, &[Key::KeyW])
            .bind(Intent::MoveBackward, &[Key::KeyS])
            .bind(Intent::StrafeLeft, &[Key::KeyA])
            .bind(Intent::StrafeRight, &[Key::KeyD])
            .bind(Intent::LookLeft, &[Key::ArrowLeft])
            .bind(Intent::LookRight, &[Key::ArrowRight])
            .bind(Intent::LookUp, &[Key::ArrowUp])
            .bind(Intent::LookDown, &[Key::ArrowDown])
    }
}

/// Events the host delivers between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseMove { dx: f32, dy: f32 },
    PointerLock(bool),
    FocusLost,
    FocusGained,
}

/// Tracks held keys and pending look deltas between frames
#[derive(Debug, Clone)]
pub struct InputTracker {
    key_map: KeyMap,
    pressed: HashSet<Key>,
    look_delta: (f32, f32),
    pointer_locked: bool,
    enabled: bool,
}

impl InputTracker {
    pub fn new(key_map: KeyMap) -> Self {
        Self {
            key_map,
            pressed: HashSet::new(),
            look_delta: (0.0, 0.0),
            pointer_locked: false,
            enabled: true,
        }
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Dispatch a queued host event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::KeyUp(key) => self.on_key_up(key),
            InputEvent::MouseMove { dx, dy } => self.on_mouse_move(dx, dy),
            InputEvent::PointerLock(locked) => self.set_pointer_locked(locked),
            // Key-ups are not delivered while unfocused, so stop tracking keys
            // until focus returns
            InputEvent::FocusLost => {
                self.set_enabled(false);
                self.release_all();
            }
            InputEvent::FocusGained => self.set_enabled(true),
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        if !self.enabled || self.key_map.intent(key).is_none() {
            return;
        }
        self.pressed.insert(key);
    }

    pub fn on_key_up(&mut self, key: Key) {
        if !self.enabled {
            return;
        }
        self.pressed.remove(&key);
    }

    /// Accumulate relative pointer motion; dropped unless the pointer is locked
    pub fn on_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.pointer_locked || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.look_delta.0 += dx;
        self.look_delta.1 += dy;
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer_locked != locked {
            log::debug!("pointer lock {}", if locked { "acquired" } else { "released" });
        }
        self.pointer_locked = locked;
        if !locked {
            self.look_delta = (0.0, 0.0);
        }
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Gate movement input; disabling also releases every held key
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pressed.clear();
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Release everything, e.g. when the window loses focus and key-up
    /// events would otherwise never arrive
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.look_delta = (0.0, 0.0);
    }

    /// Take this frame's snapshot. The pending look delta moves into the
    /// snapshot and is zeroed here, so each delta is consumed exactly once.
    pub fn snapshot(&mut self) -> InputState {
        let mut state = InputState::new();
        for key in &self.pressed {
            if let Some(intent) = self.key_map.intent(*key) {
                state.set(intent, true);
            }
        }
        state.look_delta = std::mem::take(&mut self.look_delta);
        state
    }
}

impl Controller for InputTracker {
    fn is_held(&self, intent: Intent) -> bool {
        self.pressed
            .iter()
            .any(|key| self.key_map.intent(*key) == Some(intent))
    }
}
