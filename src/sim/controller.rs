//! Animation run/stop state and the fixed-interval tick driver
//!
//! The host timer is modelled two ways: `fire` is one firing of a
//! self-rescheduling callback, and `advance` is an accumulator loop for hosts
//! that report elapsed frame time instead.

use std::time::Duration;

use super::state::BallRegistry;
use super::tick::step;
use crate::consts::{INITIAL_SPEED, MAX_SUBSTEPS};

/// Whether the repeating tick is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Stopped,
    Running,
}

/// Owns the run state, the speed scalar and the tick clock
#[derive(Debug, Clone)]
pub struct AnimationController {
    phase: AnimationPhase,
    speed: u32,
    speed_increment: u32,
    tick_interval: Duration,
    /// Time carried over toward the next tick
    accumulator: Duration,
    /// Ticks fired since creation
    time_ticks: u64,
}

impl AnimationController {
    pub fn new(tick_interval: Duration, speed_increment: u32) -> Self {
        Self {
            phase: AnimationPhase::Stopped,
            speed: INITIAL_SPEED,
            speed_increment,
            tick_interval,
            accumulator: Duration::ZERO,
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == AnimationPhase::Running
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Arm the repeating tick. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = AnimationPhase::Running;
        log::info!("Animation started at speed {}", self.speed);
        true
    }

    /// Disarm the tick; the next firing will not re-arm
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("Animation stopped after {} ticks", self.time_ticks);
        }
        self.phase = AnimationPhase::Stopped;
        self.accumulator = Duration::ZERO;
    }

    /// Stop, drop every ball and restore the initial speed
    pub fn reset(&mut self, registry: &mut BallRegistry) {
        self.stop();
        let removed = registry.len();
        registry.clear();
        self.speed = INITIAL_SPEED;
        log::info!("Canvas reset, removed {} balls", removed);
    }

    /// Raise the speed for the next and all later ticks
    pub fn speed_up(&mut self) {
        self.speed = self.speed.saturating_add(self.speed_increment);
        log::info!("Speed is now {}", self.speed);
    }

    /// One timer firing. Steps the balls and returns true to re-arm, or
    /// returns false without stepping when stopped.
    pub fn fire(
        &mut self,
        registry: &mut BallRegistry,
        canvas_width: f32,
        canvas_height: f32,
    ) -> bool {
        if !self.is_running() {
            return false;
        }
        step(registry.balls_mut(), self.speed, canvas_width, canvas_height);
        self.time_ticks += 1;
        true
    }

    /// Feed elapsed wall-clock time and return how many ticks came due
    ///
    /// At most `MAX_SUBSTEPS` ticks are due per call; any further backlog is
    /// dropped. Nothing accumulates while stopped.
    pub fn due_ticks(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }

        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.tick_interval && due < MAX_SUBSTEPS {
            self.accumulator -= self.tick_interval;
            due += 1;
        }

        if self.accumulator >= self.tick_interval {
            log::debug!("Dropping {:?} of tick backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Feed elapsed time and fire every tick that came due
    ///
    /// `on_tick` sees the registry after each tick. Returns the number of
    /// ticks fired.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        registry: &mut BallRegistry,
        canvas_width: f32,
        canvas_height: f32,
        mut on_tick: impl FnMut(&BallRegistry),
    ) -> u32 {
        let mut fired = 0;
        for _ in 0..self.due_ticks(elapsed) {
            if !self.fire(registry, canvas_width, canvas_height) {
                break;
            }
            fired += 1;
            on_tick(registry);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Color;

    const W: f32 = 490.0;
    const H: f32 = 500.0;

    fn controller() -> AnimationController {
        AnimationController::new(Duration::from_millis(10), 2)
    }

    fn registry_with_balls(n: usize) -> BallRegistry {
        let mut registry = BallRegistry::new(12345);
        for _ in 0..n {
            registry.add_ball(10.0, Color::Red, W, H, 500).unwrap();
        }
        registry
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut c = controller();
        assert_eq!(c.phase(), AnimationPhase::Stopped);
        assert!(c.start());
        assert!(!c.start());
        assert_eq!(c.phase(), AnimationPhase::Running);
    }

    #[test]
    fn test_speed_up_adds_increment() {
        let mut c = controller();
        for n in 1..=5 {
            c.speed_up();
            assert_eq!(c.speed(), 1 + 2 * n);
        }
    }

    #[test]
    fn test_speed_up_then_reset() {
        let mut c = controller();
        let mut registry = registry_with_balls(3);
        c.start();
        c.speed_up();
        c.speed_up();
        c.reset(&mut registry);
        assert_eq!(c.speed(), 1);
        assert!(registry.is_empty());
        assert!(!c.is_running());
    }

    #[test]
    fn test_reset_from_stopped() {
        let mut c = controller();
        let mut registry = registry_with_balls(2);
        c.reset(&mut registry);
        assert_eq!(c.speed(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_fire_when_stopped_does_not_move() {
        let mut c = controller();
        let mut registry = registry_with_balls(2);
        let before: Vec<_> = registry.balls().iter().map(|b| b.center).collect();

        assert!(!c.fire(&mut registry, W, H));
        let after: Vec<_> = registry.balls().iter().map(|b| b.center).collect();
        assert_eq!(before, after);
        assert_eq!(c.time_ticks(), 0);
    }

    #[test]
    fn test_fire_rearms_until_stopped() {
        let mut c = controller();
        let mut registry = registry_with_balls(1);
        c.start();
        assert!(c.fire(&mut registry, W, H));
        assert!(c.fire(&mut registry, W, H));
        c.stop();
        assert!(!c.fire(&mut registry, W, H));
        assert_eq!(c.time_ticks(), 2);
    }

    #[test]
    fn test_advance_fires_per_interval() {
        let mut c = controller();
        let mut registry = registry_with_balls(1);
        c.start();

        assert_eq!(c.advance(Duration::from_millis(25), &mut registry, W, H, |_| {}), 2);
        // 5ms carried over
        assert_eq!(c.advance(Duration::from_millis(5), &mut registry, W, H, |_| {}), 1);
        assert_eq!(c.time_ticks(), 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut c = controller();
        let mut registry = registry_with_balls(1);
        c.start();

        let fired = c.advance(Duration::from_secs(1), &mut registry, W, H, |_| {});
        assert_eq!(fired, MAX_SUBSTEPS);
        // Backlog was dropped
        assert_eq!(c.advance(Duration::from_millis(9), &mut registry, W, H, |_| {}), 0);
    }

    #[test]
    fn test_advance_reports_each_tick() {
        let mut c = controller();
        let mut registry = registry_with_balls(2);
        c.start();

        let mut seen = Vec::new();
        let fired = c.advance(Duration::from_millis(30), &mut registry, W, H, |r| {
            seen.push(r.balls()[0].center)
        });
        assert_eq!(fired, 3);
        assert_eq!(seen.len(), 3);
        // Every callback saw a different frame
        assert_ne!(seen[0], seen[1]);
        assert_ne!(seen[1], seen[2]);
        assert_eq!(seen[2], registry.balls()[0].center);
    }

    #[test]
    fn test_advance_when_stopped() {
        let mut c = controller();
        let mut registry = registry_with_balls(1);
        assert_eq!(c.advance(Duration::from_millis(100), &mut registry, W, H, |_| {}), 0);
    }

    #[test]
    fn test_speed_up_affects_next_tick() {
        let mut c = controller();
        let mut registry = registry_with_balls(1);
        c.start();
        c.speed_up();
        let before = registry.balls()[0].center;
        c.fire(&mut registry, W, H);
        let moved = registry.balls()[0].center - before;
        assert_eq!(moved.x.abs(), 3.0);
        assert_eq!(moved.y.abs(), 3.0);
    }
}
