use glam::{Quat, Vec3};

use crate::camera::CameraPose;

use super::controller::{Controller, InputState, Intent};

/// Per-session movement tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Units per second along each held axis
    pub speed: f32,
    /// Radians per pixel of pointer motion
    pub look_sensitivity: f32,
    /// Radians per second for digital look keys
    pub rotation_speed: f32,
    /// Normalise forward+strafe so diagonals are not sqrt(2) faster.
    /// Off by default.
    pub normalize_diagonal: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            look_sensitivity: 0.002,
            rotation_speed: 1.5,
            normalize_diagonal: false,
        }
    }
}

/// Camera-local velocity from held intents: forward is -Z, strafe right is +X.
/// Axes are independent; with both held the length is `speed * sqrt(2)`.
pub fn local_velocity(input: &InputState, config: &MovementConfig) -> Vec3 {
    let direction = Vec3::new(
        input.axis(Intent::StrafeRight, Intent::StrafeLeft),
        0.0,
        input.axis(Intent::MoveBackward, Intent::MoveForward),
    );
    let direction = if config.normalize_diagonal {
        direction.normalize_or_zero()
    } else {
        direction
    };
    direction * config.speed
}

/// Advance position by the local velocity turned by yaw only, so pitch never
/// changes walking direction
pub fn update(pose: &CameraPose, input: &InputState, dt: f32, config: &MovementConfig) -> Vec3 {
    let dt = dt.max(0.0);
    let velocity = local_velocity(input, config);
    if velocity == Vec3::ZERO || dt == 0.0 {
        return pose.position;
    }
    let world = Quat::from_rotation_y(pose.yaw) * velocity;
    pose.position + world * dt
}
