//! Per-frame motion step
//!
//! Advances every ball by one tick. Walls are checked against the tentative
//! displacement and the direction flips before the move, so a ball resting on
//! a wall leaves it on the same tick.

use super::state::Ball;

/// Highest speed at which a ball of `radius` is guaranteed to stay inside
/// the canvas: `(min(width, height) - 2 * radius) / 2`
///
/// Above it a reflected move can carry the box past the opposite wall; no
/// clamping is applied.
pub fn max_contained_speed(radius: f32, canvas_width: f32, canvas_height: f32) -> u32 {
    ((canvas_width.min(canvas_height) - 2.0 * radius) / 2.0).max(0.0) as u32
}

/// Advance every ball exactly one tick, in registry order
pub fn step(balls: &mut [Ball], speed: u32, canvas_width: f32, canvas_height: f32) {
    for ball in balls.iter_mut() {
        step_ball(ball, speed, canvas_width, canvas_height);
    }
}

/// Reflect then move a single ball
pub fn step_ball(ball: &mut Ball, speed: u32, canvas_width: f32, canvas_height: f32) {
    let bounds = ball.bounds();
    let tentative = ball.direction.displacement(speed);

    if bounds.x1 + tentative.x < 0.0 || bounds.x2 + tentative.x > canvas_width {
        ball.direction.flip_x();
    }
    if bounds.y1 + tentative.y < 0.0 || bounds.y2 + tentative.y > canvas_height {
        ball.direction.flip_y();
    }

    // Flipped direction applies to this tick's move
    ball.center += ball.direction.displacement(speed);
}
