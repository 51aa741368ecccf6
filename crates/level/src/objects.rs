use common::{Entity, Point};
use physics::Collidable;
use serde::Deserialize;

/// Doorway to another level.
///
/// Touching it arms a one-shot signal that [`Door::level_changed`]
/// consumes, so a player standing in the doorway triggers one transition.
#[derive(Clone, Debug, Deserialize)]
pub struct Door {
    #[serde(flatten)]
    pub body: Entity,
    /// Name of the level this door leads to.
    pub path: String,
    pub to_x: i32,
    pub to_y: i32,
    #[serde(skip)]
    armed: bool,
}

impl Door {
    pub fn new(body: Entity, path: impl Into<String>, to: Point) -> Self {
        Self {
            body,
            path: path.into(),
            to_x: to.x,
            to_y: to.y,
            armed: false,
        }
    }

    /// Returns the destination level once per collision.
    pub fn level_changed(&mut self) -> Option<String> {
        if self.armed {
            self.armed = false;
            Some(self.path.clone())
        } else {
            None
        }
    }

    /// Where the player appears in the destination level.
    pub fn destination(&self) -> Point {
        Point::new(self.to_x, self.to_y)
    }
}

impl Collidable for Door {
    fn body(&self) -> &Entity {
        &self.body
    }

    fn on_collided(&mut self) {
        self.armed = true;
    }
}

/// Patch of shore where the player can start fishing.
#[derive(Clone, Debug, Deserialize)]
pub struct FishingSpot {
    #[serde(flatten)]
    pub body: Entity,
    #[serde(skip)]
    active: bool,
}

impl FishingSpot {
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Collidable for FishingSpot {
    fn body(&self) -> &Entity {
        &self.body
    }

    fn on_collided(&mut self) {
        self.active = true;
    }
}

/// Trophy shelf; bumping into it opens the catch records.
#[derive(Clone, Debug, Deserialize)]
pub struct Shelf {
    #[serde(flatten)]
    pub body: Entity,
    #[serde(skip)]
    opened: bool,
}

impl Shelf {
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            opened: false,
        }
    }

    /// One-shot: `true` once after each bump.
    pub fn take_opened(&mut self) -> bool {
        std::mem::take(&mut self.opened)
    }
}

impl Collidable for Shelf {
    fn body(&self) -> &Entity {
        &self.body
    }

    fn on_collided(&mut self) {
        self.opened = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum LightKind {
    /// Hearth glow, only at night.
    Fire,
    /// Daylight through a window.
    Window,
}

/// Decorative light source.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub x: i32,
    pub y: i32,
    pub radius: f32,
}

impl Light {
    /// Strength in `[0, 1]` at the given time of day (`0..1`, noon at 0.5).
    pub fn intensity(&self, time_of_day: f32) -> f32 {
        let night = time_of_day < 0.15 || time_of_day > 0.85;
        match self.kind {
            LightKind::Fire if night => 0.8,
            LightKind::Window if !night => 0.5 - (time_of_day - 0.5).abs(),
            _ => 0.0,
        }
    }

    pub fn is_lit(&self, time_of_day: f32) -> bool {
        self.intensity(time_of_day) > 0.0
    }

    /// Light reaching world point `(x, y)`: full intensity at the source,
    /// fading linearly to nothing at `radius`.
    pub fn glow_at(&self, x: i32, y: i32, time_of_day: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let dx = (x - self.x) as f32;
        let dy = (y - self.y) as f32;
        let falloff = 1.0 - dx.hypot(dy) / self.radius;
        self.intensity(time_of_day) * falloff.max(0.0)
    }
}
