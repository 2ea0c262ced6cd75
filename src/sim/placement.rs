//! Non-overlapping placement for new balls
//!
//! Rejection sampling over the feasible rectangle, capped, then a
//! deterministic scan so a crowded canvas reports an error instead of
//! spinning forever.

use glam::Vec2;
use rand::Rng;

use super::state::Ball;
use crate::error::{CanvasError, Result};

/// Grid step for the fallback scan
const SCAN_STEP: f32 = 1.0;

/// True if a circle at `center` with `radius` overlaps `ball`
///
/// Touching circles (distance == sum of radii) do not overlap.
#[inline]
pub fn overlaps(center: Vec2, radius: f32, ball: &Ball) -> bool {
    center.distance(ball.center) < radius + ball.radius()
}

/// True if the candidate is clear of every placed ball
#[inline]
pub fn is_free(center: Vec2, radius: f32, balls: &[Ball]) -> bool {
    !balls.iter().any(|b| overlaps(center, radius, b))
}

/// Find a center for a new ball that overlaps none of `balls`
///
/// Centers are sampled uniformly from `[radius, width - radius]` ×
/// `[radius, height - radius]`. After `max_attempts` rejected samples the
/// rectangle is scanned row by row.
pub fn find_free_position(
    radius: f32,
    balls: &[Ball],
    canvas_width: f32,
    canvas_height: f32,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> Result<Vec2> {
    let (max_x, max_y) = (canvas_width - radius, canvas_height - radius);
    let finite = radius.is_finite() && max_x.is_finite() && max_y.is_finite();
    if !finite || radius <= 0.0 || max_x < radius || max_y < radius {
        return Err(CanvasError::PlacementExhausted {
            radius,
            attempts: 0,
        });
    }

    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            rng.random_range(radius..=max_x),
            rng.random_range(radius..=max_y),
        );
        if is_free(candidate, radius, balls) {
            return Ok(candidate);
        }
    }

    log::warn!(
        "Random placement failed {} times for radius {}, scanning canvas",
        max_attempts,
        radius
    );

    scan_for_free_position(radius, balls, max_x, max_y)
        .ok_or(CanvasError::PlacementExhausted { radius, attempts: max_attempts })
}

/// Row-major scan of the feasible rectangle
fn scan_for_free_position(radius: f32, balls: &[Ball], max_x: f32, max_y: f32) -> Option<Vec2> {
    let mut y = radius;
    while y <= max_y {
        let mut x = radius;
        while x <= max_x {
            let candidate = Vec2::new(x, y);
            if is_free(candidate, radius, balls) {
                return Some(candidate);
            }
            x += SCAN_STEP;
        }
        y += SCAN_STEP;
    }
    None
}
