//! Deterministic ball simulation
//!
//! All canvas logic lives here. This module must stay free of rendering:
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - Time enters only through the controller

pub mod controller;
pub mod placement;
pub mod state;
pub mod tick;

pub use controller::{AnimationController, AnimationPhase};
pub use placement::{find_free_position, is_free, overlaps};
pub use state::{Ball, BallRegistry, Bounds, Color, Direction};
pub use tick::{max_contained_speed, step, step_ball};
