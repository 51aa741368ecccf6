//! Keyboard and mouse intent for one tick.
//!
//! Held flags are sampled from bracket-lib's advanced input each tick and
//! turned into one-shot edges here, so the simulation only ever sees a
//! plain [`InputState`].

use bracket_lib::prelude::{VirtualKeyCode, INPUT};

use crate::config::InputConfig;

/// Raw held state of every input the game cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub primary: bool,
    pub cancel: bool,
    pub debug: bool,
    pub god: bool,
    pub confirm: bool,
    pub quit: bool,
}

/// What the simulation reads each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Primary button held.
    pub primary: bool,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub cancel: bool,
    pub toggle_debug: bool,
    pub toggle_god: bool,
    pub confirm: bool,
    pub quit: bool,
}

impl InputState {
    /// Derives edges by comparing with the previous tick.
    pub fn from_held(now: HeldKeys, before: HeldKeys) -> Self {
        let edge = |n: bool, b: bool| n && !b;
        Self {
            left: now.left,
            right: now.right,
            up: now.up,
            down: now.down,
            primary: now.primary,
            primary_pressed: edge(now.primary, before.primary),
            primary_released: edge(before.primary, now.primary),
            cancel: edge(now.cancel, before.cancel),
            toggle_debug: edge(now.debug, before.debug),
            toggle_god: edge(now.god, before.god),
            confirm: edge(now.confirm, before.confirm),
            quit: edge(now.quit, before.quit),
        }
    }
}

/// Samples the host input once per tick.
#[derive(Debug, Default)]
pub struct InputPoller {
    before: HeldKeys,
}

impl InputPoller {
    pub fn poll(&mut self, cfg: &InputConfig) -> InputState {
        use VirtualKeyCode::*;
        let input = INPUT.lock();
        let key = |k: VirtualKeyCode| input.is_key_pressed(k);
        let now = HeldKeys {
            left: key(cfg.left) || key(Left),
            right: key(cfg.right) || key(Right),
            up: key(cfg.up) || key(Up),
            down: key(cfg.down) || key(Down),
            primary: key(cfg.cast) || input.is_mouse_button_pressed(0),
            cancel: key(cfg.cancel),
            debug: key(cfg.debug),
            god: key(cfg.god),
            confirm: key(Return),
            quit: key(Q),
        };
        let state = InputState::from_held(now, self.before);
        self.before = now;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_edges() {
        let up = HeldKeys::default();
        let down = HeldKeys {
            primary: true,
            ..Default::default()
        };
        let pressed = InputState::from_held(down, up);
        assert!(pressed.primary && pressed.primary_pressed && !pressed.primary_released);
        let held = InputState::from_held(down, down);
        assert!(held.primary && !held.primary_pressed);
        let released = InputState::from_held(up, down);
        assert!(!released.primary && released.primary_released);
    }

    #[test]
    fn toggles_fire_once() {
        let f1 = HeldKeys {
            debug: true,
            ..Default::default()
        };
        assert!(InputState::from_held(f1, HeldKeys::default()).toggle_debug);
        assert!(!InputState::from_held(f1, f1).toggle_debug);
    }

    #[test]
    fn movement_is_level_triggered() {
        let keys = HeldKeys {
            left: true,
            down: true,
            ..Default::default()
        };
        let state = InputState::from_held(keys, keys);
        assert!(state.left && state.down && !state.right && !state.up);
    }
}
