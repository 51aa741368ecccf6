//! Common types shared across Reelhaven crates.

use serde::{Deserialize, Serialize};

/// Simple 2D coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `true` when both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Base world object: an axis-aligned box with a velocity.
///
/// Every drawable or collidable thing in a scene is built around one of
/// these. Sizes are expected to be positive while the entity is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default)]
    pub dx: i32,
    #[serde(default)]
    pub dy: i32,
    #[serde(default = "visible_default")]
    pub visible: bool,
}

fn visible_default() -> bool {
    true
}

impl Entity {
    /// Creates a visible, stationary entity.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            dx: 0,
            dy: 0,
            visible: true,
        }
    }

    /// Translates the entity by the given delta.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Translates the entity by its own velocity.
    pub fn step(&mut self) {
        self.move_by(self.dx, self.dy);
    }

    pub fn set_velocity(&mut self, dx: i32, dy: i32) {
        self.dx = dx;
        self.dy = dy;
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Horizontal centre of the box.
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Moves toward `target` by at most `speed` units, snapping onto it
    /// when closer than one step.
    pub fn move_towards(&mut self, target: Point, speed: i32) {
        let dx = (target.x - self.x) as f64;
        let dy = (target.y - self.y) as f64;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < speed as f64 {
            self.x = target.x;
            self.y = target.y;
        } else {
            let step = speed as f64 / distance;
            self.move_by((dx * step).round() as i32, (dy * step).round() as i32);
        }
    }
}

/// Compass bearing in whole degrees from `from` to `to`.
///
/// 0 points up the screen, 90 to the right; the result lies in `[0, 360)`.
pub fn bearing(from: Point, to: Point) -> i32 {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let degrees = dy.atan2(dx).to_degrees() + 90.0;
    (degrees.round() as i32).rem_euclid(360)
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid operation")]
    InvalidOperation,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no animation registered for state `{state}`")]
    MissingAnimation { state: String },
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("level error: {0}")]
    Level(String),
    #[error("broken invariant: {0}")]
    Invariant(&'static str),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_new_sets_coordinates() {
        let p = Point::new(2, 3);
        assert_eq!(p.x, 2);
        assert_eq!(p.y, 3);
        assert!(!p.is_zero());
        assert!(Point::default().is_zero());
    }

    #[test]
    fn step_applies_velocity() {
        let mut e = Entity::new(10, 10, 5, 5);
        e.set_velocity(3, -2);
        e.step();
        assert_eq!((e.x, e.y), (13, 8));
        assert_eq!(e.right(), 18);
        assert_eq!(e.bottom(), 13);
    }

    #[test]
    fn move_towards_snaps_when_close() {
        let mut e = Entity::new(0, 0, 1, 1);
        e.move_towards(Point::new(3, 0), 5);
        assert_eq!((e.x, e.y), (3, 0));
    }

    #[test]
    fn move_towards_takes_one_step() {
        let mut e = Entity::new(0, 0, 1, 1);
        e.move_towards(Point::new(100, 0), 5);
        assert_eq!((e.x, e.y), (5, 0));
        e.move_towards(Point::new(5, 100), 5);
        assert_eq!((e.x, e.y), (5, 5));
    }

    #[test]
    fn bearing_compass_points() {
        let o = Point::new(0, 0);
        assert_eq!(bearing(o, Point::new(0, -10)), 0);
        assert_eq!(bearing(o, Point::new(10, 0)), 90);
        assert_eq!(bearing(o, Point::new(0, 10)), 180);
        assert_eq!(bearing(o, Point::new(-10, 0)), 270);
    }

    #[test]
    fn bearing_just_left_of_up_wraps_to_zero() {
        let o = Point::new(0, 0);
        // about 359.6 degrees before rounding
        assert_eq!(bearing(o, Point::new(-1, -150)), 0);
        assert_eq!(bearing(o, Point::new(-10, -10)), 315);
    }

    #[test]
    fn entity_deserializes_with_defaults() {
        let e: Entity = serde_json::from_str(r#"{"x":1,"y":2,"w":3,"h":4}"#).unwrap();
        assert_eq!(e, Entity::new(1, 2, 3, 4));
    }
}
