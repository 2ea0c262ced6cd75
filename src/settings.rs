//! Canvas settings
//!
//! Loaded from JSON; any key left out takes its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{CanvasError, Result};
use crate::sim::Color;

/// Canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Drawable area width
    pub canvas_width: f32,
    /// Drawable area height
    pub canvas_height: f32,
    /// Delay between animation frames (ms)
    pub tick_interval_ms: u64,
    /// Selectable radii
    pub allowed_sizes: Vec<f32>,
    /// Selectable colors
    pub allowed_colors: Vec<Color>,
    /// Amount added per speed-up
    pub speed_increment: u32,
    /// Random samples before placement scans the canvas
    pub max_placement_attempts: u32,
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            allowed_sizes: BALL_SIZES.to_vec(),
            allowed_colors: Color::ALL.to_vec(),
            speed_increment: SPEED_INCREMENT,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |msg: &str| -> Result<()> { Err(CanvasError::InvalidSettings(msg.to_string())) };
        let dimension_ok = |d: f32| d.is_finite() && d > 0.0 && d <= MAX_CANVAS_DIMENSION;

        if !(dimension_ok(self.canvas_width) && dimension_ok(self.canvas_height)) {
            return invalid("canvas dimensions must be positive, finite and at most 16384");
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be at least 1");
        }
        if self.allowed_sizes.is_empty() {
            return invalid("allowed_sizes must not be empty");
        }
        if self.allowed_sizes.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return invalid("allowed_sizes must all be positive and finite");
        }
        if self.allowed_colors.is_empty() {
            return invalid("allowed_colors must not be empty");
        }
        if self.speed_increment == 0 {
            return invalid("speed_increment must be at least 1");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn size_allowed(&self, size: f32) -> bool {
        self.allowed_sizes.contains(&size)
    }

    pub fn color_allowed(&self, color: Color) -> bool {
        self.allowed_colors.contains(&color)
    }
}
