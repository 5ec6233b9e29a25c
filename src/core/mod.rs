pub mod boundary;
pub mod clock;
pub mod controller;
pub mod driver;
pub mod input;
pub mod input_adapter;
pub mod movement;
pub mod orientation;
pub mod timer;
pub mod window;

pub use boundary::Boundary;
pub use clock::{Clock, InstantSource, TimeSource};
pub use controller::{Controller, InputState, Intent, Key};
pub use driver::{DriverState, FrameDriver, RenderSink, Session};
pub use input::{InputEvent, InputTracker, KeyMap};
pub use input_adapter::WinitController;
pub use movement::MovementConfig;
pub use orientation::LookRates;
pub use timer::{FpsMeter, Throttled};
pub use window::WindowDimensions;
