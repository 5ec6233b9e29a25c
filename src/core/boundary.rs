use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the XZ plane; height is unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Boundary {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_z..=self.max_z).contains(&position.z)
    }

    /// Snap to the nearest point inside, each axis independently. Y untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.max(self.min_x).min(self.max_x),
            position.y,
            position.z.max(self.min_z).min(self.max_z),
        )
    }
}

/// Apply an optional boundary
pub fn clamp(position: Vec3, boundary: Option<&Boundary>) -> Vec3 {
    match boundary {
        Some(boundary) => boundary.clamp(position),
        None => position,
    }
}
