//! Error types for the ball canvas.

use std::fmt;

use crate::sim::Color;

/// Errors raised by placement, selection and settings loading.
#[derive(Debug)]
pub enum CanvasError {
    /// No non-overlapping spot exists for a ball of this radius.
    PlacementExhausted { radius: f32, attempts: u32 },
    /// Size is not one of the configured radii.
    SizeNotAllowed(f32),
    /// Color is not one of the configured colors.
    ColorNotAllowed(Color),
    /// Settings failed validation.
    InvalidSettings(String),
    /// Failed to read a settings file.
    Io(std::io::Error),
    /// Failed to parse settings JSON.
    Json(serde_json::Error),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::PlacementExhausted { radius, attempts } => write!(
                f,
                "No free position for a ball of radius {} after {} random attempts and a full scan",
                radius, attempts
            ),
            CanvasError::SizeNotAllowed(size) => write!(f, "Ball size {} is not allowed", size),
            CanvasError::ColorNotAllowed(color) => {
                write!(f, "Ball color {} is not allowed", color.as_str())
            }
            CanvasError::InvalidSettings(msg) => write!(f, "Invalid settings: {}", msg),
            CanvasError::Io(e) => write!(f, "Failed to read settings: {}", e),
            CanvasError::Json(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanvasError::Io(e) => Some(e),
            CanvasError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CanvasError {
    fn from(e: std::io::Error) -> Self {
        CanvasError::Io(e)
    }
}

impl From<serde_json::Error> for CanvasError {
    fn from(e: serde_json::Error) -> Self {
        CanvasError::Json(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CanvasError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_mentions_radius() {
        let err = CanvasError::PlacementExhausted {
            radius: 30.0,
            attempts: 500,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_json_error_has_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CanvasError::from(parse);
        assert!(err.source().is_some());
        assert!(CanvasError::SizeNotAllowed(5.0).source().is_none());
    }
}
