use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::core::window::WindowDimensions;

/// Pitch limit in radians; pitch always stays within [-PITCH_LIMIT, PITCH_LIMIT]
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Camera position and orientation.
///
/// Rotation is composed YXZ: yaw about world up on the outside, pitch about the
/// local right axis inside it, no roll. Keeping that order is what stops pitch
/// changes from tilting the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// View direction; -Z rotated by the pose
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.6, 0.0), 0.0, 0.0)
    }
}

/// Min/max clamp, never wraps. NaN collapses to level.
pub fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.max(-PITCH_LIMIT).min(PITCH_LIMIT)
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    #[serde(skip, default = "default_aspect")]
    pub aspect: f32,
}

fn default_aspect() -> f32 {
    1.0
}

impl Projection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            near,
            far,
            aspect: default_aspect(),
        }
    }

    /// Projection update hook, called on viewport resize
    pub fn resize(&mut self, dimensions: WindowDimensions) {
        self.aspect = dimensions.aspect();
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(75.0, 0.1, 100.0)
    }
}

/// What the renderer receives each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pose: CameraPose,
    pub projection: Projection,
}

impl Camera {
    pub fn new(pose: CameraPose, projection: Projection) -> Self {
        Self { pose, projection }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.pose.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_default_pose_looks_down_negative_z() {
        let pose = CameraPose::default();
        assert!(pose.forward().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(pose.right().abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn test_new_clamps_pitch() {
        let pose = CameraPose::new(Vec3::ZERO, 0.0, 3.0);
        assert_eq!(pose.pitch, PITCH_LIMIT);
        assert_eq!(clamp_pitch(-10.0), -PITCH_LIMIT);
        assert_eq!(clamp_pitch(f32::NAN), 0.0);
    }

    #[test]
    fn test_yaw_then_pitch_has_no_roll() {
        for &(yaw, pitch) in &[(0.7, 0.4), (-2.0, -1.2), (3.0, 1.5), (1.0, PITCH_LIMIT)] {
            let pose = CameraPose::new(Vec3::ZERO, yaw, pitch);
            // Right vector stays in the horizontal plane
            assert!(pose.right().y.abs() < EPS, "roll at yaw={yaw} pitch={pitch}");
            assert!((pose.forward().y - pitch.sin()).abs() < EPS);
        }
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let pose = CameraPose::new(Vec3::new(3.0, 1.6, -2.0), 0.5, -0.3);
        let eye = pose.view_matrix().transform_point3(pose.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));

        let ahead = pose.position + pose.forward() * 4.0;
        let local = pose.view_matrix().transform_point3(ahead);
        assert!(local.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-4));
    }

    #[test]
    fn test_projection_resize_guards_zero_height() {
        let mut projection = Projection::default();
        projection.resize(WindowDimensions::new(1280, 0));
        assert_eq!(projection.aspect, 1280.0);
        assert!(projection.matrix().is_finite());

        projection.resize(WindowDimensions::new(800, 600));
        assert!((projection.aspect - 800.0 / 600.0).abs() < EPS);
    }
}
