use crate::camera::{clamp_pitch, CameraPose};

use super::controller::{Controller, InputState, Intent};

/// Look rates: digital keys turn at `rotation_speed` rad/s, the pointer turns
/// `look_sensitivity` rad per pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookRates {
    pub rotation_speed: f32,
    pub look_sensitivity: f32,
}

/// Integrate look intents and the pointer delta into yaw/pitch.
///
/// Left and up are positive. Pointer motion right or down turns the view right
/// or down. Pitch is clamped after every update; yaw is left unbounded.
pub fn update(pose: &CameraPose, input: &InputState, dt: f32, rates: LookRates) -> CameraPose {
    let dt = dt.max(0.0);
    let step = rates.rotation_speed * dt;
    let (dx, dy) = input.look_delta;

    let yaw = pose.yaw + input.axis(Intent::LookLeft, Intent::LookRight) * step
        - dx * rates.look_sensitivity;
    let pitch = pose.pitch + input.axis(Intent::LookUp, Intent::LookDown) * step
        - dy * rates.look_sensitivity;

    CameraPose {
        position: pose.position,
        yaw,
        pitch: clamp_pitch(pitch),
    }
}
