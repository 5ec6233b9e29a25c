//! Per-frame orchestration.
//!
//! One tick runs clock -> input snapshot -> orientation -> movement ->
//! boundary -> handoff, in that order, and finishes before the next one starts.

use crate::camera::{Camera, CameraPose};
use crate::frame::FrameInfo;

use super::boundary::{self, Boundary};
use super::clock::{Clock, InstantSource, TimeSource};
use super::controller::InputState;
use super::input::InputTracker;
use super::movement::{self, MovementConfig};
use super::orientation::{self, LookRates};
use super::window::WindowDimensions;

/// Receives the updated camera once per frame
pub trait RenderSink {
    fn present(&mut self, camera: &Camera, frame: &FrameInfo);
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Running,
    Paused,
}

/// Explicit per-session context: the camera plus its immutable tuning
#[derive(Debug, Clone)]
pub struct Session {
    pub camera: Camera,
    pub movement: MovementConfig,
    pub boundary: Option<Boundary>,
}

impl Session {
    pub fn new(camera: Camera, movement: MovementConfig, boundary: Option<Boundary>) -> Self {
        Self {
            camera,
            movement,
            boundary,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.camera.pose
    }

    /// Run the integration pipeline for one frame's input and delta
    pub fn step(&mut self, input: &InputState, dt: f32) {
        let rates = LookRates {
            rotation_speed: self.movement.rotation_speed,
            look_sensitivity: self.movement.look_sensitivity,
        };
        let mut pose = orientation::update(&self.camera.pose, input, dt, rates);
        pose.position = movement::update(&pose, input, dt, &self.movement);
        pose.position = boundary::clamp(pose.position, self.boundary.as_ref());
        self.camera.pose = pose;
    }
}

/// Owns the session and the frame clock; the only writer of the camera pose
#[derive(Debug)]
pub struct FrameDriver<T: TimeSource = InstantSource> {
    session: Session,
    clock: Clock<T>,
    state: DriverState,
    frame_number: u64,
}

impl FrameDriver<InstantSource> {
    pub fn new(session: Session) -> Self {
        Self::with_clock(session, Clock::new())
    }
}

impl<T: TimeSource> FrameDriver<T> {
    pub fn with_clock(session: Session, clock: Clock<T>) -> Self {
        Self {
            session,
            clock,
            state: DriverState::Uninitialized,
            frame_number: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn camera(&self) -> &Camera {
        &self.session.camera
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Move to Running; the first delta after starting is zero
    pub fn start(&mut self) {
        if self.state == DriverState::Uninitialized {
            self.clock.reset();
            self.state = DriverState::Running;
            log::info!("frame driver running");
        }
    }

    pub fn pause(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Paused;
            log::info!("frame driver paused at frame {}", self.frame_number);
        }
    }

    pub fn resume(&mut self) {
        if self.state == DriverState::Paused {
            self.state = DriverState::Running;
            log::info!("frame driver resumed");
        }
    }

    /// Projection update hook for viewport resizes
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("clamping degenerate viewport {}x{}", width, height);
        }
        self.session
            .camera
            .projection
            .resize(WindowDimensions::new(width, height));
    }

    /// Advance one frame and hand the camera to `sink`.
    ///
    /// Ticking an uninitialized driver starts it. While paused the clock and
    /// the input snapshot are still consumed but the pose is left alone.
    pub fn tick(&mut self, input: &mut InputTracker, sink: &mut dyn RenderSink) -> FrameInfo {
        self.start();

        let delta = self.clock.tick();
        let snapshot = input.snapshot();
        if self.state == DriverState::Running {
            self.session.step(&snapshot, delta);
        }

        let frame = FrameInfo::new(self.frame_number, self.clock.elapsed(), delta);
        self.frame_number += 1;

        log::trace!(
            "frame {} dt={:.4} pose={:?}",
            frame.number,
            frame.delta,
            self.session.camera.pose
        );
        sink.present(&self.session.camera, &frame);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use crate::core::controller::Key;
    use crate::core::input::KeyMap;
    use glam::Vec3;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualSource(Rc<Cell<f64>>);

    impl TimeSource for ManualSource {
        fn now(&self) -> f64 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(CameraPose, FrameInfo)>,
    }

    impl RenderSink for RecordingSink {
        fn present(&mut self, camera: &Camera, frame: &FrameInfo) {
            self.frames.push((camera.pose, *frame));
        }
    }

    fn driver() -> (FrameDriver<ManualSource>, Rc<Cell<f64>>) {
        let time = Rc::new(Cell::new(0.0));
        let session = Session::new(
            Camera::new(CameraPose::default(), Projection::default()),
            MovementConfig::default(),
            Some(Boundary::new(-10.0, 10.0, -5.0, 5.0)),
        );
        let clock = Clock::with_source(ManualSource(time.clone()));
        (FrameDriver::with_clock(session, clock), time)
    }

    #[test]
    fn first_tick_starts_with_zero_delta() {
        let (mut driver, time) = driver();
        let mut input = InputTracker::new(KeyMap::pointer_look());
        let mut sink = RecordingSink::default();
        input.on_key_down(Key::KeyW);

        time.set(50.0);
        assert_eq!(driver.state(), DriverState::Uninitialized);
        let frame = driver.tick(&mut input, &mut sink);

        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(frame.delta, 0.0);
        assert_eq!(driver.camera().pose, CameraPose::default());
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn running_tick_moves_and_clamps() {
        let (mut driver, time) = driver();
        let mut input = InputTracker::new(KeyMap::pointer_look());
        let mut sink = RecordingSink::default();
        driver.tick(&mut input, &mut sink);

        input.on_key_down(Key::KeyW);
        time.set(1.0);
        driver.tick(&mut input, &mut sink);
        assert!(driver
            .camera()
            .pose
            .position
            .abs_diff_eq(Vec3::new(0.0, 1.6, -3.0), 1e-5));

        // Two more seconds would reach z = -9; the wall is at -5
        time.set(3.0);
        let frame = driver.tick(&mut input, &mut sink);
        assert_eq!(driver.camera().pose.position.z, -5.0);
        assert_eq!(frame.number, 2);
        assert_eq!(frame.time, 3.0);
        assert_eq!(sink.frames.last().map(|f| f.0), Some(driver.camera().pose));
    }

    #[test]
    fn paused_driver_holds_pose_and_drains_input() {
        let (mut driver, time) = driver();
        let mut input = InputTracker::new(KeyMap::pointer_look());
        let mut sink = RecordingSink::default();
        driver.tick(&mut input, &mut sink);
        driver.pause();

        input.set_pointer_locked(true);
        input.on_mouse_move(200.0, 0.0);
        input.on_key_down(Key::KeyD);
        time.set(5.0);
        driver.tick(&mut input, &mut sink);
        assert_eq!(driver.camera().pose, CameraPose::default());

        // The stall was consumed while paused; the pointer delta is gone
        driver.resume();
        time.set(5.5);
        let frame = driver.tick(&mut input, &mut sink);
        assert_eq!(frame.delta, 0.5);
        assert_eq!(driver.camera().pose.yaw, 0.0);
        assert!((driver.camera().pose.position.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_projection() {
        let (mut driver, _) = driver();
        driver.resize(1600, 900);
        assert!((driver.camera().projection.aspect - 16.0 / 9.0).abs() < 1e-6);
        driver.resize(1600, 0);
        assert_eq!(driver.camera().projection.aspect, 1600.0);
    }
}
