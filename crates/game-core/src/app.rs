use super::{InputConfig, InputPoller, InputState, ReelhavenGame, ShellRequest};
use bracket_lib::prelude::*;

/// Which screen the shell is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Running,
    Paused,
    Trophies,
}

pub struct ReelhavenApp {
    game: Box<ReelhavenGame>,
    state: AppState,
    poller: InputPoller,
    input: InputConfig,
}

impl ReelhavenApp {
    pub fn new(game: ReelhavenGame, input: InputConfig) -> Self {
        Self {
            game: Box::new(game),
            state: AppState::Running,
            poller: InputPoller::default(),
            input,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Advances the shell by one tick. Returns `true` to quit.
    fn update_state(&mut self, input: &InputState) -> bool {
        match self.state {
            AppState::Running => {
                self.game.step(input);
                match self.game.take_request() {
                    Some(ShellRequest::Pause) => self.state = AppState::Paused,
                    Some(ShellRequest::Trophies) => self.state = AppState::Trophies,
                    None => {}
                }
                false
            }
            AppState::Paused => {
                if input.quit {
                    return true;
                }
                if input.cancel || input.confirm {
                    self.game.resume();
                    self.state = AppState::Running;
                }
                false
            }
            AppState::Trophies => {
                if input.cancel || input.confirm {
                    self.game.resume();
                    self.state = AppState::Running;
                }
                false
            }
        }
    }
}

impl GameState for ReelhavenApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let input = self.poller.poll(&self.input);
        if self.update_state(&input) {
            tracing::info!("quitting");
            ctx.quit();
            return;
        }
        ctx.cls();
        if let Err(e) = self.game.draw(ctx) {
            tracing::error!("draw failed: {}", e);
        }
    }
}
