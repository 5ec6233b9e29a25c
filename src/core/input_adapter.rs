use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::Key;
use super::input::InputEvent;

/// Adapter that translates Winit events into tracker input events
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitController;

impl WinitController {
    pub fn new() -> Self {
        Self
    }

    /// Keyboard events from the focused window. Key repeats are dropped.
    pub fn translate_window_event(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return None;
                }
                let key = Self::physical_key_to_key(event.physical_key)?;
                Some(match event.state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                })
            }
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            WindowEvent::Focused(true) => Some(InputEvent::FocusGained),
            _ => None,
        }
    }

    /// Raw pointer motion; unaffected by cursor clamping at window edges
    pub fn translate_device_event(&self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(InputEvent::MouseMove {
                dx: *dx as f32,
                dy: *dy as f32,
            }),
            _ => None,
        }
    }

    pub fn physical_key_to_key(physical_key: PhysicalKey) -> Option<Key> {
        match physical_key {
            PhysicalKey::Code(code) => Self::keycode_to_key(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Map Winit KeyCode to Key
    pub fn keycode_to_key(keycode: KeyCode) -> Option<Key> {
        match keycode {
            KeyCode::KeyW => Some(Key::KeyW),
            KeyCode::KeyA => Some(Key::KeyA),
            KeyCode::KeyS => Some(Key::KeyS),
            KeyCode::KeyD => Some(Key::KeyD),
            KeyCode::KeyQ => Some(Key::KeyQ),
            KeyCode::KeyE => Some(Key::KeyE),
            KeyCode::ArrowUp => Some(Key::ArrowUp),
            KeyCode::ArrowDown => Some(Key::ArrowDown),
            KeyCode::ArrowLeft => Some(Key::ArrowLeft),
            KeyCode::ArrowRight => Some(Key::ArrowRight),
            KeyCode::Space => Some(Key::Space),
            KeyCode::ShiftLeft => Some(Key::ShiftLeft),
            KeyCode::ShiftRight => Some(Key::ShiftRight),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}
