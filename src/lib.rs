pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod loaders;
pub mod window;

pub use camera::{Camera, CameraPose, Projection};
pub use config::{SessionConfig, Variant};
pub use frame::FrameInfo;
