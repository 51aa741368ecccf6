use std::sync::Arc;

use animation::{Animator, FrameSet, DEFAULT_ANIMATION_SPEED};
use common::{Entity, GameResult};

/// Units per tick the player walks.
pub const PLAYER_MAX_SPEED: i32 = 9;

/// Facing suffixes indexed by `angle / 45`.
pub const FACINGS: [&str; 8] = [
    "back",
    "top_right",
    "right",
    "bottom_right",
    "front",
    "bottom_left",
    "left",
    "top_left",
];

/// Every walking and standing animation the player needs.
pub fn movement_states() -> Vec<String> {
    FACINGS
        .iter()
        .flat_map(|f| [format!("walk_{}", f), format!("idle_{}", f)])
        .collect()
}

/// The player character.
#[derive(Debug)]
pub struct Player {
    pub body: Entity,
    pub animator: Animator,
    pub max_speed: i32,
    /// While set, the fishing minigame owns the animation state.
    pub is_fishing: bool,
    angle: i32,
}

impl Player {
    /// Creates a player facing the camera. Fails if `frames` is missing a
    /// movement or fishing animation.
    pub fn new(body: Entity, frames: Arc<FrameSet>) -> GameResult<Self> {
        let states = movement_states();
        let mut required: Vec<&str> = states.iter().map(String::as_str).collect();
        required.extend(fishing::PLAYER_FISHING_STATES);
        frames.require(&required)?;
        Ok(Self {
            body,
            animator: Animator::new(frames, "idle_front", DEFAULT_ANIMATION_SPEED)?,
            max_speed: PLAYER_MAX_SPEED,
            is_fishing: false,
            angle: 180,
        })
    }

    /// Facing in degrees, one of the eight compass points.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Sets velocity from held direction keys. Opposite keys cancel out.
    pub fn steer(&mut self, left: bool, right: bool, up: bool, down: bool) {
        let speed = self.max_speed;
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) * speed;
        self.body.set_velocity(axis(left, right), axis(up, down));
    }

    /// Snaps the facing to the direction of travel. Only full-speed
    /// movement along one of the eight directions changes it.
    pub fn calc_angle(&mut self) {
        let m = self.max_speed;
        self.angle = match (self.body.dx, self.body.dy) {
            (0, dy) if dy == -m => 0,
            (dx, dy) if dx == m && dy == -m => 45,
            (dx, 0) if dx == m => 90,
            (dx, dy) if dx == m && dy == m => 135,
            (0, dy) if dy == m => 180,
            (dx, dy) if dx == -m && dy == m => 225,
            (dx, 0) if dx == -m => 270,
            (dx, dy) if dx == -m && dy == -m => 315,
            _ => self.angle,
        };
    }

    /// Animation label for the current velocity and facing.
    pub fn calc_state(&self) -> String {
        let moving = self.body.dx != 0 || self.body.dy != 0;
        let prefix = if moving { "walk" } else { "idle" };
        let suffix = FACINGS[(self.angle / 45).rem_euclid(8) as usize];
        format!("{}_{}", prefix, suffix)
    }

    /// Re-derives the animation from movement unless fishing drives it.
    pub fn update_animation(&mut self) -> GameResult<()> {
        self.calc_angle();
        if !self.is_fishing {
            let state = self.calc_state();
            self.animator.set_state(&state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_frames() -> Arc<FrameSet> {
    let states = movement_states();
    let mut wanted: Vec<(&str, usize)> = states.iter().map(|s| (s.as_str(), 4)).collect();
    wanted.extend(fishing::PLAYER_FISHING_STATES.iter().map(|s| (*s, 3)));
    Arc::new(FrameSet::synthetic("player", &wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Entity::new(0, 0, 96, 144), test_frames()).unwrap()
    }

    #[test]
    fn missing_animation_rejected() {
        let frames = Arc::new(FrameSet::synthetic("player", &[("idle_front", 1)]));
        assert!(Player::new(Entity::new(0, 0, 1, 1), frames).is_err());
    }

    #[test]
    fn angle_follows_full_speed_moves() {
        let mut p = player();
        let cases = [
            ((false, false, true, false), 0),
            ((false, true, true, false), 45),
            ((false, true, false, false), 90),
            ((false, true, false, true), 135),
            ((false, false, false, true), 180),
            ((true, false, false, true), 225),
            ((true, false, false, false), 270),
            ((true, false, true, false), 315),
        ];
        for ((l, r, u, d), angle) in cases {
            p.steer(l, r, u, d);
            p.calc_angle();
            assert_eq!(p.angle(), angle);
        }
    }

    #[test]
    fn stopping_keeps_facing() {
        let mut p = player();
        p.steer(true, false, false, false);
        p.update_animation().unwrap();
        assert_eq!(p.animator.state(), "walk_left");
        p.steer(false, false, false, false);
        p.update_animation().unwrap();
        assert_eq!(p.animator.state(), "idle_left");
    }

    #[test]
    fn partial_speed_keeps_angle() {
        let mut p = player();
        p.body.set_velocity(3, 0);
        p.calc_angle();
        assert_eq!(p.angle(), 180);
        assert_eq!(p.calc_state(), "walk_front");
    }

    #[test]
    fn fishing_owns_animation() {
        let mut p = player();
        p.is_fishing = true;
        p.animator.set_state("casting").unwrap();
        p.steer(false, true, false, false);
        p.update_animation().unwrap();
        assert_eq!(p.animator.state(), "casting");
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut p = player();
        p.steer(true, true, false, true);
        assert_eq!((p.body.dx, p.body.dy), (0, PLAYER_MAX_SPEED));
    }
}
