//! Fishing minigame: charge, cast, wait, hook, reel and land.
//!
//! [`FishingLogic`] owns everything that exists only while the player is
//! fishing. The orchestrator feeds it one tick at a time and performs the
//! spatial checks (bite and landing) after the player has moved.

pub mod line;
pub mod meter;

use std::sync::Arc;

use animation::{Animator, FrameSet, ACTION_ANIMATION_SPEED, DEFAULT_ANIMATION_SPEED};
use bracket_lib::prelude::RandomNumberGenerator;
use common::{Entity, GameError, GameResult, Point};
use data::FishSpecies;
use ecology::{select_species, Fish, FISH_STATES};
use physics::is_colliding;

pub use line::{FishingLine, TensionBand};
pub use meter::ChargeMeter;

/// Seconds-ish the bite timer loses per tick.
pub const WAIT_STEP: f32 = 0.01;
/// How far a perfect cast throws the float above the player.
pub const CAST_DISTANCE: f32 = 100.0;

pub const ANIM_CASTING: &str = "casting";
pub const ANIM_IDLE_FISHING: &str = "idle_fishing";
pub const ANIM_REELING: &str = "reeling";
pub const ANIM_REELING_LEFT: &str = "reeling_left";
pub const ANIM_REELING_RIGHT: &str = "reeling_right";
pub const ANIM_CATCHING: &str = "catching";
pub const ANIM_IDLE_BACK: &str = "idle_back";

/// Player animation states the minigame switches between.
pub const PLAYER_FISHING_STATES: [&str; 7] = [
    ANIM_CASTING,
    ANIM_IDLE_FISHING,
    ANIM_REELING,
    ANIM_REELING_LEFT,
    ANIM_REELING_RIGHT,
    ANIM_CATCHING,
    ANIM_IDLE_BACK,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FishingState {
    /// Not at a fishing spot.
    #[default]
    Inactive,
    Idle,
    Charging,
    Casting,
    Waiting,
    Reeling,
    Caught,
}

/// Held inputs the minigame reads each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FishingInput {
    /// Primary button held: charges the meter and reels in a resting fish.
    pub reel: bool,
    pub left: bool,
    pub right: bool,
}

/// Outcome of a fishing session the orchestrator has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FishingEvent {
    Caught { name: String, weight: i32 },
    Lost { name: String },
}

fn invariant(what: &'static str) -> GameError {
    debug_assert!(false, "{}", what);
    tracing::error!(what, "fishing invariant broken");
    GameError::Invariant(what)
}

/// The fishing state machine and the objects it owns.
#[derive(Debug)]
pub struct FishingLogic {
    state: FishingState,
    meter: Option<ChargeMeter>,
    charge_power: f32,
    line: Option<FishingLine>,
    fish: Option<Fish>,
    wait_timer: f32,
    weight_multiplier: f32,
    fish_frames: Arc<FrameSet>,
}

impl FishingLogic {
    /// Fails when `fish_frames` lacks a state every fish needs.
    pub fn new(fish_frames: Arc<FrameSet>) -> GameResult<Self> {
        fish_frames.require(&FISH_STATES)?;
        Ok(Self {
            state: FishingState::Inactive,
            meter: None,
            charge_power: 0.0,
            line: None,
            fish: None,
            wait_timer: 0.0,
            weight_multiplier: 1.0,
            fish_frames,
        })
    }

    pub fn state(&self) -> FishingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != FishingState::Inactive
    }

    pub fn meter(&self) -> Option<&ChargeMeter> {
        self.meter.as_ref()
    }

    pub fn line(&self) -> Option<&FishingLine> {
        self.line.as_ref()
    }

    pub fn line_mut(&mut self) -> Option<&mut FishingLine> {
        self.line.as_mut()
    }

    pub fn fish(&self) -> Option<&Fish> {
        self.fish.as_ref()
    }

    pub fn fish_mut(&mut self) -> Option<&mut Fish> {
        self.fish.as_mut()
    }

    /// Accuracy sampled from the meter at release.
    pub fn charge_power(&self) -> f32 {
        self.charge_power
    }

    pub fn weight_multiplier(&self) -> f32 {
        self.weight_multiplier
    }

    pub fn wait_timer(&self) -> f32 {
        self.wait_timer
    }

    fn transition(&mut self, to: FishingState) {
        tracing::debug!(from = ?self.state, to = ?to, "fishing state");
        self.state = to;
    }

    /// The player stepped onto a fishing spot.
    pub fn enter_spot(&mut self) -> bool {
        if self.state != FishingState::Inactive {
            return false;
        }
        tracing::info!("at fishing spot");
        self.transition(FishingState::Idle);
        true
    }

    /// Primary button pressed. Starts charging when idle.
    pub fn press(&mut self, player: &Entity) -> bool {
        if self.state != FishingState::Idle {
            return false;
        }
        self.meter = Some(ChargeMeter::beside(player));
        self.transition(FishingState::Charging);
        true
    }

    /// Primary button released. Commits the cast when charging.
    pub fn release(&mut self) -> bool {
        if self.state != FishingState::Charging {
            return false;
        }
        let Some(meter) = self.meter.take() else {
            // charging always has a meter; treat a missing one as a zero cast
            let _ = invariant("charging without a meter");
            self.charge_power = 0.0;
            self.transition(FishingState::Casting);
            return true;
        };
        self.charge_power = meter.accuracy();
        tracing::info!(power = self.charge_power, "cast released");
        self.transition(FishingState::Casting);
        true
    }

    /// Cancels fishing from any active state and drops every fishing object.
    pub fn abort(&mut self) -> bool {
        if self.state == FishingState::Inactive {
            return false;
        }
        tracing::info!(from = ?self.state, "fishing aborted");
        self.state = FishingState::Inactive;
        self.meter = None;
        self.line = None;
        self.fish = None;
        self.charge_power = 0.0;
        self.wait_timer = 0.0;
        self.weight_multiplier = 1.0;
        true
    }

    /// Runs one tick of the state machine.
    ///
    /// States fall through within a tick, so a cast that finishes this tick
    /// already counts down its bite timer. `pool` is the candidate list for
    /// the current habitat and `water` the spawn area.
    pub fn update(
        &mut self,
        input: FishingInput,
        player: &Entity,
        anim: &mut Animator,
        pool: &[FishSpecies],
        water: Option<&Entity>,
        rng: &mut RandomNumberGenerator,
    ) -> GameResult<Option<FishingEvent>> {
        if self.state == FishingState::Inactive {
            return Ok(None);
        }
        if self.state == FishingState::Charging && input.reel {
            match self.meter.as_mut() {
                Some(meter) => meter.increase_charge(),
                None => return Err(invariant("charging without a meter")),
            }
        }
        if self.state == FishingState::Casting {
            self.cast(player, anim, rng)?;
        }
        if self.state == FishingState::Waiting {
            self.wait(pool, water, rng)?;
        }
        if self.state == FishingState::Reeling {
            self.reel(input, anim, rng)?;
        }
        let mut event = None;
        if self.state == FishingState::Caught {
            event = self.land(anim)?;
        }
        if self.state == FishingState::Idle {
            anim.set_state(ANIM_IDLE_BACK)?;
        }
        Ok(event)
    }

    fn cast(
        &mut self,
        player: &Entity,
        anim: &mut Animator,
        rng: &mut RandomNumberGenerator,
    ) -> GameResult<()> {
        if anim.state() != ANIM_CASTING {
            anim.set_state(ANIM_CASTING)?;
            anim.set_speed(ACTION_ANIMATION_SPEED);
        }
        if !anim.is_complete() {
            return Ok(());
        }
        let power = self.charge_power;
        let x = player.center_x();
        let y = player.y - (power * CAST_DISTANCE).round() as i32;
        let anchor = Point::new(x, player.bottom() - player.h / 4);
        self.line = Some(FishingLine::new(x, y, anchor, rng));
        self.wait_timer = (1.0 - power) + 1.0;
        self.weight_multiplier = 1.0 + power / 2.0;
        anim.set_state(ANIM_IDLE_FISHING)?;
        anim.set_speed(DEFAULT_ANIMATION_SPEED);
        tracing::info!(x, y, timer = self.wait_timer, "float landed");
        self.transition(FishingState::Waiting);
        Ok(())
    }

    fn wait(
        &mut self,
        pool: &[FishSpecies],
        water: Option<&Entity>,
        rng: &mut RandomNumberGenerator,
    ) -> GameResult<()> {
        self.wait_timer -= WAIT_STEP;
        if self.wait_timer > 0.0 {
            return Ok(());
        }
        self.wait_timer = 0.0;
        let target = self
            .line
            .as_ref()
            .map(FishingLine::float_target)
            .ok_or_else(|| invariant("waiting without a line"))?;

        if self.fish.is_none() {
            let species = select_species(pool, rng)
                .ok_or_else(|| GameError::Level("no species live in this habitat".into()))?;
            let water = water.ok_or_else(|| invariant("fishing spot without water"))?;
            let fish = Fish::spawn(species.clone(), water, target, self.fish_frames.clone(), rng)?;
            self.fish = Some(fish);
        }

        let Some(fish) = self.fish.as_mut() else {
            return Ok(());
        };
        fish.update(target);
        if fish.hook_finished() {
            fish.body.visible = false;
            tracing::info!(fish = fish.name(), weight = fish.weight(), "reeling");
            self.transition(FishingState::Reeling);
        }
        Ok(())
    }

    fn reel(
        &mut self,
        input: FishingInput,
        anim: &mut Animator,
        rng: &mut RandomNumberGenerator,
    ) -> GameResult<()> {
        let line = self
            .line
            .as_mut()
            .ok_or_else(|| invariant("reeling without a line"))?;
        line.update(input.left, input.right, input.reel, rng);
        let label = match (input.left, input.right) {
            (true, false) => ANIM_REELING_LEFT,
            (false, true) => ANIM_REELING_RIGHT,
            _ => ANIM_REELING,
        };
        anim.set_state(label)?;
        Ok(())
    }

    fn land(&mut self, anim: &mut Animator) -> GameResult<Option<FishingEvent>> {
        self.line = None;
        if anim.state() != ANIM_CATCHING {
            anim.set_state(ANIM_CATCHING)?;
            anim.set_speed(ACTION_ANIMATION_SPEED);
        }
        if !anim.is_complete() {
            return Ok(None);
        }
        let mut fish = self
            .fish
            .take()
            .ok_or_else(|| invariant("caught without a fish"))?;
        let weight = fish.apply_multiplier(self.weight_multiplier);
        anim.refresh();
        anim.set_speed(DEFAULT_ANIMATION_SPEED);
        tracing::info!(fish = fish.name(), weight, "fish caught");
        self.transition(FishingState::Idle);
        Ok(Some(FishingEvent::Caught {
            name: fish.species.name,
            weight,
        }))
    }

    /// Hooks the fish if it has reached the float. Returns `true` only on
    /// the tick the hook happens.
    pub fn check_bite(&mut self) -> bool {
        let (Some(line), Some(fish)) = (self.line.as_ref(), self.fish.as_mut()) else {
            return false;
        };
        is_colliding(&fish.body, line.float()) && fish.hook()
    }

    /// Decides a finished fight by where the float is.
    ///
    /// While reeling, a float that has reached `player` lands the fish. A
    /// snapped line with the float still out loses it.
    pub fn check_landing(&mut self, player: &Entity) -> Option<FishingEvent> {
        if self.state != FishingState::Reeling {
            return None;
        }
        let Some(line) = self.line.as_mut() else {
            let _ = invariant("reeling without a line");
            return None;
        };
        if is_colliding(player, line.float()) {
            line.set_game_over(true);
            tracing::info!("float reached the player");
            self.transition(FishingState::Caught);
            return None;
        }
        if !line.is_game_over() {
            return None;
        }
        let name = self
            .fish
            .take()
            .map(|f| f.species.name)
            .unwrap_or_default();
        self.line = None;
        tracing::info!(fish = %name, "fish got away");
        self.transition(FishingState::Idle);
        Some(FishingEvent::Lost { name })
    }

    /// Advances the fish's animation.
    pub fn animate(&mut self) {
        if let Some(fish) = self.fish.as_mut() {
            fish.animate();
        }
    }

    /// Applies a camera shift to everything fishing owns.
    pub fn shift(&mut self, delta: Point) {
        if delta.is_zero() {
            return;
        }
        if let Some(meter) = self.meter.as_mut() {
            meter.body.move_by(delta.x, delta.y);
        }
        if let Some(line) = self.line.as_mut() {
            line.shift(delta);
        }
        if let Some(fish) = self.fish.as_mut() {
            fish.body.move_by(delta.x, delta.y);
        }
    }
}
