//! Dead-zone camera.
//!
//! The camera never moves itself. When the tracked entity pushes past the
//! dead zone it is pinned to the boundary and the camera reports a shift
//! that the caller applies to every world-space object instead.

use common::{Entity, Point};

/// Viewport size the game is laid out for.
pub const VIEWPORT_WIDTH: i32 = 1920;
pub const VIEWPORT_HEIGHT: i32 = 1080;

/// Inclusive-exclusive rectangle the tracked entity may roam freely in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeadZone {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Clone, Debug)]
pub struct Camera {
    bounds_ratio: f32,
    viewport_w: i32,
    viewport_h: i32,
    delta: Point,
}

impl Camera {
    /// Creates a camera whose dead zone covers `bounds_ratio` of the
    /// viewport. A ratio of `0` pins the camera in place.
    pub fn new(bounds_ratio: f32, viewport_w: i32, viewport_h: i32) -> Self {
        Self {
            bounds_ratio: bounds_ratio.clamp(0.0, 1.0),
            viewport_w,
            viewport_h,
            delta: Point::default(),
        }
    }

    pub fn set_bounds_ratio(&mut self, bounds_ratio: f32) {
        self.bounds_ratio = bounds_ratio.clamp(0.0, 1.0);
        self.delta = Point::default();
    }

    pub fn bounds_ratio(&self) -> f32 {
        self.bounds_ratio
    }

    /// Centered region of `bounds_ratio * viewport` size, or `None` for a
    /// static camera.
    pub fn dead_zone(&self) -> Option<DeadZone> {
        if self.bounds_ratio == 0.0 {
            return None;
        }
        let margin_x = ((1.0 - self.bounds_ratio) * self.viewport_w as f32 / 2.0).round() as i32;
        let margin_y = ((1.0 - self.bounds_ratio) * self.viewport_h as f32 / 2.0).round() as i32;
        Some(DeadZone {
            left: margin_x,
            top: margin_y,
            right: self.viewport_w - margin_x,
            bottom: self.viewport_h - margin_y,
        })
    }

    /// Clamps `tracked` into the dead zone and returns the world shift for
    /// this tick.
    pub fn follow(&mut self, tracked: &mut Entity) -> Point {
        let Some(zone) = self.dead_zone() else {
            self.delta = Point::default();
            return self.delta;
        };

        let dx = if tracked.right() > zone.right {
            tracked.x = zone.right - tracked.w;
            -tracked.dx
        } else if tracked.x < zone.left {
            tracked.x = zone.left;
            -tracked.dx
        } else {
            0
        };

        let dy = if tracked.bottom() > zone.bottom {
            tracked.y = zone.bottom - tracked.h;
            -tracked.dy
        } else if tracked.y < zone.top {
            tracked.y = zone.top;
            -tracked.dy
        } else {
            0
        };

        self.delta = Point::new(dx, dy);
        self.delta
    }

    /// Shift produced by the last [`Camera::follow`] call.
    pub fn delta(&self) -> Point {
        self.delta
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}
