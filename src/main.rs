use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window as WinitWindow, WindowId},
};

use scene_walker::cli::Cli;
use scene_walker::config::SessionConfig;
use scene_walker::core::{Clock, FpsMeter, FrameDriver, InputEvent, InputTracker, WinitController};
use scene_walker::loaders::{ModelLoader, PendingModel};
use scene_walker::window::{self, Window};

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

// === Application ===

struct App {
    config: SessionConfig,
    show_pose: bool,
    window: Option<Window>,
    driver: FrameDriver,
    input: InputTracker,
    adapter: WinitController,
    pending_models: Vec<PendingModel>,
    fps: FpsMeter,
}

impl App {
    fn new(config: SessionConfig, show_pose: bool) -> Self {
        let clock = Clock::new().with_max_delta(config.max_frame_delta);
        Self {
            driver: FrameDriver::with_clock(config.session(), clock),
            input: InputTracker::new(config.key_map()),
            adapter: WinitController::new(),
            window: None,
            pending_models: Vec::new(),
            fps: FpsMeter::new(FPS_UPDATE_INTERVAL),
            show_pose,
            config,
        }
    }

    fn start_model_loads(&mut self) {
        let loader = ModelLoader::new();
        for spec in &self.config.models {
            match loader.load(spec) {
                Ok(pending) => self.pending_models.push(pending),
                Err(e) => log::warn!("{:#}", e),
            }
        }
    }

    /// Drain finished loads; the navigation loop never waits on them
    fn poll_model_loads(&mut self) {
        self.pending_models.retain_mut(|pending| match pending.poll_ready() {
            None => true,
            Some(Ok(model)) => {
                log::info!(
                    "Loaded {:?}: {} meshes, {} vertices, bounds {:?}",
                    model.path,
                    model.meshes,
                    model.vertices,
                    model.bounds
                );
                false
            }
            Some(Err(e)) => {
                log::warn!("{:#}", e);
                false
            }
        });
    }

    fn set_pointer_lock(&mut self, lock: bool) {
        let locked = match &self.window {
            Some(window) => window.set_pointer_lock(lock),
            None => false,
        };
        self.input.apply(InputEvent::PointerLock(locked));
    }

    fn redraw(&mut self) {
        self.poll_model_loads();

        let Some(window) = &mut self.window else {
            return;
        };
        let frame = self.driver.tick(&mut self.input, window);
        if let Some(fps) = self.fps.tick(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(
            WinitWindow::default_attributes()
                .with_title(window::title())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.driver.resize(size.width, size.height);
        self.window = Some(Window::new(window, self.show_pose));
        self.start_model_loads();
        self.driver.start();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(input_event) = self.adapter.translate_window_event(&event) {
            self.input.apply(input_event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                // First Escape frees the pointer, the next one quits
                if self.input.pointer_locked() {
                    self.set_pointer_lock(false);
                } else {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if self.config.pointer_lock && !self.input.pointer_locked() => {
                self.set_pointer_lock(true);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    self.driver.resume();
                } else {
                    self.set_pointer_lock(false);
                    self.driver.pause();
                }
            }
            WindowEvent::Resized(size) => self.driver.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(input_event) = self.adapter.translate_device_event(&event) {
            self.input.apply(input_event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = SessionConfig::from_cli(&cli)?;
    log::info!(
        "Starting {:?}: speed {} u/s, boundary {:?}, normalize diagonal {}",
        config.variant,
        config.speed,
        config.boundary,
        config.normalize_diagonal
    );

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, !cli.no_ui);

    println!("Scene Walker - Controls: WASD/arrows, click to look, Escape to release/quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
