//! Line tension model for the reeling phase.
//!
//! The hooked fish drags the line sideways. Once the float drifts more than
//! half the line's amplitude from the player, tension builds every tick and
//! the player has to hold the opposite direction to slow the fish down.
//! Bringing the drift to a standstill triggers a struggle; after enough of
//! them the fish tires and rests, which is the window for reeling in.

use bracket_lib::prelude::RandomNumberGenerator;
use common::{Entity, Point};

pub const FLOAT_SIZE: i32 = 15;
/// Tension at which the line snaps.
pub const MAX_TENSION: i32 = 70;
pub const CAUTION_TENSION: i32 = 10;
pub const DANGER_TENSION: i32 = 30;
/// Ticks a tired fish rests before fighting again.
pub const REST_DURATION: i32 = 40;
/// Units per tick the float comes in while resting and reeling.
pub const REEL_SPEED: i32 = 2;

const STRUGGLES_BEFORE_REST: (i32, i32) = (2, 6);
const MAX_STRUGGLES: (i32, i32) = (4, 10);
const MAX_FISH_SPEED: (i32, i32) = (4, 6);
const INITIAL_DRIFT: (i32, i32) = (1, 5);
const AMPLITUDE: (i32, i32) = (150, 400);
const STRUGGLE_KICK: i32 = 5;
const STRUGGLE_RESET: i32 = 3;
const DRIFT_JITTER: i32 = 6;

/// How close the line is to snapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensionBand {
    Safe,
    Caution,
    Danger,
    Snapped,
    /// The fish is resting; tension is held at zero.
    Resting,
}

#[derive(Clone, Debug)]
pub struct FishingLine {
    /// Drift state of the line end; the float trails it by one tick.
    body: Entity,
    float: Entity,
    anchor: Point,
    amplitude: i32,
    max_fish_speed: i32,
    tension: i32,
    struggle_counter: i32,
    max_struggles: i32,
    struggles_before_rest: i32,
    rest_counter: i32,
    game_over: bool,
}

impl FishingLine {
    /// Creates a line whose float lands at `(x, y)`, tied to the rod at
    /// `anchor`.
    pub fn new(x: i32, y: i32, anchor: Point, rng: &mut RandomNumberGenerator) -> Self {
        let mut body = Entity::new(x, y, FLOAT_SIZE, FLOAT_SIZE);
        body.dx = rng.range(INITIAL_DRIFT.0, INITIAL_DRIFT.1);
        Self {
            float: body,
            body,
            anchor,
            amplitude: rng.range(AMPLITUDE.0, AMPLITUDE.1),
            max_fish_speed: rng.range(MAX_FISH_SPEED.0, MAX_FISH_SPEED.1),
            tension: 0,
            struggle_counter: 0,
            max_struggles: rng.range(MAX_STRUGGLES.0, MAX_STRUGGLES.1),
            struggles_before_rest: rng.range(STRUGGLES_BEFORE_REST.0, STRUGGLES_BEFORE_REST.1),
            rest_counter: 0,
            game_over: false,
        }
    }

    /// Advances the fight by one tick.
    pub fn update(&mut self, left: bool, right: bool, reel: bool, rng: &mut RandomNumberGenerator) {
        self.float.x = self.body.x;
        self.float.y = self.body.y;

        if self.rest_counter > 0 {
            self.rest(reel, rng);
        } else {
            self.pull(left, right, rng);
            self.body.move_by(self.body.dx, 0);
        }

        if self.tension >= MAX_TENSION && !self.game_over {
            tracing::info!(tension = self.tension, "line snapped");
            self.game_over = true;
        }
    }

    fn rest(&mut self, reel: bool, rng: &mut RandomNumberGenerator) {
        self.tension = 0;
        self.rest_counter -= 1;
        if reel {
            let toward_player = (self.anchor.y - self.body.y).signum() * REEL_SPEED;
            self.body.move_by(self.body.dx, toward_player);
        }
        if self.rest_counter == 0 {
            self.body.dx = if self.body.dx < 0 {
                -self.max_fish_speed
            } else {
                self.max_fish_speed
            };
            self.struggles_before_rest =
                rng.range(STRUGGLES_BEFORE_REST.0, STRUGGLES_BEFORE_REST.1);
        }
    }

    fn pull(&mut self, left: bool, right: bool, rng: &mut RandomNumberGenerator) {
        let half = self.amplitude / 2;
        if self.body.x > self.anchor.x + half {
            self.tension += 1;
            if left {
                if self.body.dx > -self.max_fish_speed {
                    self.body.dx -= 1;
                }
                if self.body.dx == 0 {
                    self.struggle(-STRUGGLE_KICK, STRUGGLE_RESET);
                }
            }
        } else if self.body.x < self.anchor.x - half {
            self.tension += 1;
            if right {
                if self.body.dx < self.max_fish_speed {
                    self.body.dx += 1;
                }
                if self.body.dx == 0 {
                    self.struggle(STRUGGLE_KICK, -STRUGGLE_RESET);
                }
            }
        } else {
            self.tension = 0;
            self.struggle_counter = 0;
            let jitter = rng.range(0, DRIFT_JITTER);
            self.body.dx = if self.body.dx < 0 {
                -self.max_fish_speed - jitter
            } else {
                self.max_fish_speed + jitter
            };
        }
    }

    fn struggle(&mut self, kick: i32, reset: i32) {
        if self.struggle_counter != self.max_struggles {
            self.body.move_by(kick, 0);
            self.body.dx = reset;
            self.struggle_counter += 1;
            tracing::debug!(struggle = self.struggle_counter, "fish struggles");
            return;
        }
        self.struggles_before_rest -= 1;
        if self.struggles_before_rest <= 0 {
            self.body.dx = -reset;
            self.rest_counter = REST_DURATION;
            tracing::debug!("fish resting");
        }
    }

    /// The visible bobber.
    pub fn float(&self) -> &Entity {
        &self.float
    }

    /// Centre of the float, where fish swim to.
    pub fn float_target(&self) -> Point {
        Point::new(self.float.x, self.float.y)
    }

    /// Where the line leaves the rod.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn tension(&self) -> i32 {
        self.tension
    }

    pub fn is_resting(&self) -> bool {
        self.rest_counter > 0
    }

    pub fn band(&self) -> TensionBand {
        if self.is_resting() {
            TensionBand::Resting
        } else if self.tension < CAUTION_TENSION {
            TensionBand::Safe
        } else if self.tension < DANGER_TENSION {
            TensionBand::Caution
        } else if self.tension < MAX_TENSION {
            TensionBand::Danger
        } else {
            TensionBand::Snapped
        }
    }

    /// Set when the line snaps or the fish is landed.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    /// Applies a camera shift.
    pub fn shift(&mut self, delta: Point) {
        self.body.move_by(delta.x, delta.y);
        self.float.move_by(delta.x, delta.y);
        self.anchor.x += delta.x;
        self.anchor.y += delta.y;
    }
}
