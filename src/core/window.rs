/// Viewport dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    /// Zero-sized edges (minimised windows) are bumped to one pixel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
