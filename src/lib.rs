//! Ball Canvas - colored balls bouncing inside a rectangle
//!
//! Core modules:
//! - `sim`: Placement, motion stepping and the animation controller
//! - `canvas`: The contract a UI shell drives
//! - `settings`: Canvas configuration
//! - `error`: Error types

pub mod canvas;
pub mod error;
pub mod settings;
pub mod sim;

pub use canvas::{BallCanvas, BallView, CanvasEvent};
pub use error::CanvasError;
pub use settings::Settings;

/// Canvas configuration constants
pub mod consts {
    /// Drawable area
    pub const CANVAS_WIDTH: f32 = 490.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Largest accepted canvas side; keeps the placement scan finite and
    /// well below the f32 integer precision limit (2^24)
    pub const MAX_CANVAS_DIMENSION: f32 = 16_384.0;

    /// Delay between animation frames (ms)
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Speed on startup and after reset
    pub const INITIAL_SPEED: u32 = 1;
    /// Added per speed-up
    pub const SPEED_INCREMENT: u32 = 2;

    /// Selectable ball radii
    pub const BALL_SIZES: [f32; 3] = [10.0, 20.0, 30.0];

    /// Random samples before placement falls back to a scan
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 500;
}
