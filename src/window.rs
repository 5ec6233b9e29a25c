use std::sync::Arc;
use winit::window::{CursorGrabMode, Window as WinitWindow};

use crate::camera::Camera;
use crate::core::{RenderSink, Throttled};
use crate::frame::FrameInfo;

const TITLE: &str = "Scene Walker";
const TITLE_REFRESH_SECS: f32 = 0.25;

/// Wrapper around winit Window; receives the per-frame camera handoff
pub struct Window {
    inner: Arc<WinitWindow>,
    show_pose: bool,
    title_timer: Throttled,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>, show_pose: bool) -> Self {
        Self {
            inner: window,
            show_pose,
            title_timer: Throttled::new(TITLE_REFRESH_SECS),
        }
    }

    /// Try to capture the pointer. Returns whether it is now locked.
    /// Falls back to confined mode on platforms without a true lock.
    pub fn set_pointer_lock(&self, lock: bool) -> bool {
        if !lock {
            if let Err(e) = self.inner.set_cursor_grab(CursorGrabMode::None) {
                log::debug!("pointer release failed: {:?}", e);
            }
            self.inner.set_cursor_visible(true);
            return false;
        }

        let grabbed = self
            .inner
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.inner.set_cursor_visible(false);
                true
            }
            Err(e) => {
                log::debug!("pointer lock request failed: {:?}", e);
                self.inner.set_cursor_visible(true);
                false
            }
        }
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}

impl RenderSink for Window {
    fn present(&mut self, camera: &Camera, frame: &FrameInfo) {
        if !self.show_pose || !self.title_timer.try_tick(frame.delta) {
            return;
        }
        let pose = &camera.pose;
        self.inner.set_title(&format!(
            "{} - pos ({:.2}, {:.2}, {:.2}) yaw {:.1}° pitch {:.1}°",
            TITLE,
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.yaw.to_degrees(),
            pose.pitch.to_degrees(),
        ));
    }
}

pub fn title() -> &'static str {
    TITLE
}
