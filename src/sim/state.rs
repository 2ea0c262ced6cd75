//! Ball and registry types
//!
//! Everything the animation mutates lives here. The registry owns the seeded
//! RNG so placements and launch directions are reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement::find_free_position;
use crate::error::Result;

/// Ball fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Yellow, Color::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }
}

/// Per-axis movement sign, each component is -1 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub fn new(dx: i8, dy: i8) -> Self {
        debug_assert!(dx == 1 || dx == -1);
        debug_assert!(dy == 1 || dy == -1);
        Self { dx, dy }
    }

    /// Pick each sign independently with probability 1/2
    pub fn random(rng: &mut impl Rng) -> Self {
        let sign = |up: bool| if up { 1 } else { -1 };
        Self::new(sign(rng.random_bool(0.5)), sign(rng.random_bool(0.5)))
    }

    pub fn flip_x(&mut self) {
        self.dx = -self.dx;
    }

    pub fn flip_y(&mut self) {
        self.dy = -self.dy;
    }

    /// Displacement for one tick at the given speed
    #[inline]
    pub fn displacement(&self, speed: u32) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32) * speed as f32
    }
}

/// Axis-aligned bounding box (x1, y1) to (x2, y2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A placed ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub center: Vec2,
    radius: f32,
    color: Color,
    pub direction: Direction,
}

impl Ball {
    pub fn new(id: u32, center: Vec2, radius: f32, color: Color, direction: Direction) -> Self {
        Self {
            id,
            center,
            radius,
            color,
            direction,
        }
    }

    /// Radius, fixed at creation
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Color, fixed at creation
    pub fn color(&self) -> Color {
        self.color
    }

    /// Live bounding box derived from the current center
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x1: self.center.x - self.radius,
            y1: self.center.y - self.radius,
            x2: self.center.x + self.radius,
            y2: self.center.y + self.radius,
        }
    }
}

/// Ordered collection of placed balls (insertion order is tick order)
#[derive(Debug, Clone)]
pub struct BallRegistry {
    balls: Vec<Ball>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl BallRegistry {
    /// Create an empty registry with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            balls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a new ball where it overlaps nothing and append it
    pub fn add_ball(
        &mut self,
        radius: f32,
        color: Color,
        canvas_width: f32,
        canvas_height: f32,
        max_attempts: u32,
    ) -> Result<&Ball> {
        let center = find_free_position(
            radius,
            &self.balls,
            canvas_width,
            canvas_height,
            &mut self.rng,
            max_attempts,
        )?;
        let direction = Direction::random(&mut self.rng);
        let id = self.next_entity_id();

        log::debug!(
            "Placed ball {} ({}, r={}) at ({:.1}, {:.1}) heading ({}, {})",
            id,
            color.as_str(),
            radius,
            center.x,
            center.y,
            direction.dx,
            direction.dy
        );

        self.balls.push(Ball::new(id, center, radius, color, direction));
        Ok(&self.balls[self.balls.len() - 1])
    }

    /// Remove every ball; IDs are not reused
    pub fn clear(&mut self) {
        self.balls.clear();
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn get(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}
