// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::Variant;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scene-walker")]
#[command(about = "First-person scene walkthrough", long_about = None)]
pub struct Cli {
    /// Navigation preset to start from
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// JSON session config; overrides the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cap on a single frame's delta in seconds (e.g. 0.0667 for 1/15s)
    #[arg(long)]
    pub max_frame_delta: Option<f32>,

    /// Normalise diagonal movement to the single-axis speed
    #[arg(long)]
    pub normalize_diagonal: bool,

    /// Disable the pose readout in the window title
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
