//! The contract a UI shell drives
//!
//! The shell forwards button presses here and drains `CanvasEvent`s to know
//! what to draw, move or erase.

use std::time::Duration;

use glam::Vec2;

use crate::error::{CanvasError, Result};
use crate::settings::Settings;
use crate::sim::{AnimationController, Ball, BallRegistry, Color};

/// What the shell needs to render a ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            center: ball.center,
            radius: ball.radius(),
            color: ball.color(),
        }
    }
}

/// Notifications for the UI shell
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Draw a new ball
    BallAdded(BallView),
    /// Redraw a ball at its new center
    BallMoved { id: u32, center: Vec2 },
    /// Erase every previously drawn ball
    Cleared,
}

/// Pending color/size choice
#[derive(Debug, Clone, Copy, Default)]
struct Selection {
    color: Option<Color>,
    size: Option<f32>,
}

/// Canvas core: registry, controller and the shell-facing event queue
#[derive(Debug)]
pub struct BallCanvas {
    settings: Settings,
    registry: BallRegistry,
    controller: AnimationController,
    selection: Selection,
    events: Vec<CanvasEvent>,
}

impl BallCanvas {
    /// Create a canvas from validated settings
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Canvas {}x{} ready (seed {}, tick {} ms)",
            settings.canvas_width,
            settings.canvas_height,
            seed,
            settings.tick_interval_ms
        );

        Ok(Self {
            registry: BallRegistry::new(seed),
            controller: AnimationController::new(
                settings.tick_interval(),
                settings.speed_increment,
            ),
            selection: Selection::default(),
            events: Vec::new(),
            settings,
        })
    }

    /// Choose a color; adds a ball if a size is already pending
    pub fn select_color(&mut self, color: Color) -> Result<Option<BallView>> {
        if !self.settings.color_allowed(color) {
            return Err(CanvasError::ColorNotAllowed(color));
        }
        self.selection.color = Some(color);
        self.try_add_selected()
    }

    /// Choose a size; adds a ball if a color is already selected
    pub fn select_size(&mut self, size: f32) -> Result<Option<BallView>> {
        if !self.settings.size_allowed(size) {
            return Err(CanvasError::SizeNotAllowed(size));
        }
        self.selection.size = Some(size);
        self.try_add_selected()
    }

    /// Add a ball once both halves of the selection exist. The size is
    /// consumed and the color stays selected for the next size pick.
    fn try_add_selected(&mut self) -> Result<Option<BallView>> {
        let (Some(color), Some(size)) = (self.selection.color, self.selection.size) else {
            return Ok(None);
        };
        self.selection.size = None;

        let ball = self.registry.add_ball(
            size,
            color,
            self.settings.canvas_width,
            self.settings.canvas_height,
            self.settings.max_placement_attempts,
        )?;
        let view = BallView::from(ball);
        self.events.push(CanvasEvent::BallAdded(view));
        Ok(Some(view))
    }

    /// Start animating. Returns false if already running.
    pub fn start(&mut self) -> bool {
        self.controller.start()
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Stop, remove all balls, restore speed 1 and forget the selection
    pub fn reset(&mut self) {
        self.controller.reset(&mut self.registry);
        self.selection = Selection::default();
        self.events.push(CanvasEvent::Cleared);
    }

    pub fn speed_up(&mut self) {
        self.controller.speed_up();
    }

    /// Feed elapsed time; queues a `BallMoved` per ball per tick fired
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let (w, h) = (self.settings.canvas_width, self.settings.canvas_height);
        let events = &mut self.events;
        self.controller.advance(elapsed, &mut self.registry, w, h, |registry| {
            events.extend(registry.balls().iter().map(|b| CanvasEvent::BallMoved {
                id: b.id,
                center: b.center,
            }));
        })
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of every ball for a full redraw
    pub fn ball_views(&self) -> Vec<BallView> {
        self.registry.balls().iter().map(BallView::from).collect()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn speed(&self) -> u32 {
        self.controller.speed()
    }

    pub fn ball_count(&self) -> usize {
        self.registry.len()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tick_interval(&self) -> Duration {
        self.controller.tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> BallCanvas {
        BallCanvas::new(Settings {
            seed: Some(12345),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_color_then_size_adds_ball() {
        let mut c = canvas();
        assert_eq!(c.select_color(Color::Red).unwrap(), None);
        let view = c.select_size(10.0).unwrap().unwrap();

        assert_eq!(view.radius, 10.0);
        assert_eq!(view.color, Color::Red);
        assert!((10.0..=480.0).contains(&view.center.x));
        assert!((10.0..=490.0).contains(&view.center.y));
        assert_eq!(c.drain_events(), vec![CanvasEvent::BallAdded(view)]);
    }

    #[test]
    fn test_size_then_color_adds_ball() {
        let mut c = canvas();
        assert_eq!(c.select_size(30.0).unwrap(), None);
        let view = c.select_color(Color::Blue).unwrap().unwrap();
        assert_eq!((view.radius, view.color), (30.0, Color::Blue));
        assert_eq!(c.ball_count(), 1);
    }

    #[test]
    fn test_color_stays_selected() {
        let mut c = canvas();
        c.select_color(Color::Yellow).unwrap();
        c.select_size(10.0).unwrap();
        c.select_size(20.0).unwrap();
        assert_eq!(c.ball_count(), 2);

        // Changing color alone never adds a ball
        assert_eq!(c.select_color(Color::Red).unwrap(), None);
        assert_eq!(c.ball_count(), 2);
    }

    #[test]
    fn test_disallowed_choices_rejected() {
        let mut c = BallCanvas::new(Settings {
            seed: Some(1),
            allowed_colors: vec![Color::Red],
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            c.select_color(Color::Blue),
            Err(CanvasError::ColorNotAllowed(Color::Blue))
        ));
        assert!(matches!(c.select_size(15.0), Err(CanvasError::SizeNotAllowed(_))));
        assert_eq!(c.ball_count(), 0);
    }

    #[test]
    fn test_placed_balls_do_not_overlap() {
        let mut c = canvas();
        c.select_color(Color::Red).unwrap();
        for size in [30.0, 20.0, 10.0, 30.0, 30.0, 20.0, 10.0, 20.0] {
            c.select_size(size).unwrap();
        }
        let views = c.ball_views();
        for (i, a) in views.iter().enumerate() {
            for b in &views[i + 1..] {
                assert!(a.center.distance(b.center) >= a.radius + b.radius);
            }
        }
    }

    #[test]
    fn test_advance_emits_moves_per_tick() {
        let mut c = canvas();
        c.select_color(Color::Red).unwrap();
        c.select_size(10.0).unwrap();
        c.select_size(20.0).unwrap();
        c.drain_events();

        // Not running yet
        assert_eq!(c.advance(Duration::from_millis(50)), 0);
        assert!(c.drain_events().is_empty());

        assert!(c.start());
        assert!(!c.start());
        assert_eq!(c.advance(Duration::from_millis(30)), 3);
        let events = c.drain_events();
        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|e| matches!(e, CanvasEvent::BallMoved { .. })));
    }

    #[test]
    fn test_stop_halts_movement() {
        let mut c = canvas();
        c.select_color(Color::Blue).unwrap();
        c.select_size(20.0).unwrap();
        c.start();
        c.advance(Duration::from_millis(20));
        c.stop();
        let before = c.ball_views();
        assert_eq!(c.advance(Duration::from_millis(100)), 0);
        assert_eq!(before, c.ball_views());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut c = canvas();
        c.select_size(20.0).unwrap();
        c.select_color(Color::Red).unwrap();
        c.start();
        c.speed_up();
        c.speed_up();
        assert_eq!(c.speed(), 5);
        c.reset();

        assert_eq!(c.speed(), 1);
        assert_eq!(c.ball_count(), 0);
        assert!(!c.is_running());
        assert_eq!(c.drain_events().last(), Some(&CanvasEvent::Cleared));

        // Selection was forgotten too
        assert_eq!(c.select_size(10.0).unwrap(), None);
    }

    #[test]
    fn test_full_canvas_reports_error() {
        let mut c = BallCanvas::new(Settings {
            seed: Some(3),
            canvas_width: 60.0,
            canvas_height: 60.0,
            max_placement_attempts: 20,
            ..Default::default()
        })
        .unwrap();
        c.select_color(Color::Red).unwrap();
        c.select_size(30.0).unwrap();
        let err = c.select_size(30.0).unwrap_err();
        assert!(matches!(err, CanvasError::PlacementExhausted { .. }));
        assert_eq!(c.ball_count(), 1);
    }

    #[test]
    fn test_same_seed_same_canvas() {
        let mut a = canvas();
        let mut b = canvas();
        for c in [&mut a, &mut b] {
            c.select_color(Color::Yellow).unwrap();
            c.select_size(20.0).unwrap();
            c.select_size(30.0).unwrap();
            c.start();
            c.advance(Duration::from_millis(80));
        }
        assert_eq!(a.ball_views(), b.ball_views());
    }
}
