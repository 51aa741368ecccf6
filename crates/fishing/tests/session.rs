use std::sync::Arc;

use animation::{Animator, FrameSet};
use bracket_lib::prelude::RandomNumberGenerator;
use common::Entity;
use data::FishSpecies;
use ecology::{HOOKED_STATE, SWIM_STATE};
use fishing::{
    FishingEvent, FishingInput, FishingLogic, FishingState, ANIM_IDLE_BACK, PLAYER_FISHING_STATES,
};

struct Session {
    logic: FishingLogic,
    anim: Animator,
    rng: RandomNumberGenerator,
    player: Entity,
    pool: Vec<FishSpecies>,
    water: Entity,
}

impl Session {
    fn new(seed: u64) -> Self {
        let fish_frames = FrameSet::synthetic("fish", &[(SWIM_STATE, 2), (HOOKED_STATE, 3)]);
        let player_states: Vec<(&str, usize)> =
            PLAYER_FISHING_STATES.iter().map(|s| (*s, 3)).collect();
        let player_frames = FrameSet::synthetic("player", &player_states);
        Self {
            logic: FishingLogic::new(Arc::new(fish_frames)).unwrap(),
            anim: Animator::new(Arc::new(player_frames), ANIM_IDLE_BACK, 5).unwrap(),
            rng: RandomNumberGenerator::seeded(seed),
            player: Entity::new(900, 500, 96, 144),
            pool: vec![FishSpecies {
                name: "Pike".into(),
                habitat: "Lake".into(),
                rarity: 6,
                min_weight: 5,
                max_weight: 20,
                sprite: String::new(),
                trophy_caught: String::new(),
                trophy_uncaught: String::new(),
            }],
            water: Entity::new(0, 700, 1920, 380),
        }
    }

    fn tick(&mut self, input: FishingInput) -> Option<FishingEvent> {
        let event = self
            .logic
            .update(
                input,
                &self.player,
                &mut self.anim,
                &self.pool,
                Some(&self.water),
                &mut self.rng,
            )
            .unwrap();
        self.logic.animate();
        self.anim.advance();
        event
    }

    fn tick_until(&mut self, input: FishingInput, done: impl Fn(&FishingLogic) -> bool) {
        for _ in 0..2000 {
            if done(&self.logic) {
                return;
            }
            assert_eq!(self.tick(input), None);
        }
        panic!("stuck in {:?}", self.logic.state());
    }

    /// Walks from the spot to a hooked fish on the line.
    fn hook_a_fish(&mut self) -> f32 {
        assert!(self.logic.enter_spot());
        assert_eq!(self.logic.state(), FishingState::Idle);

        assert!(self.logic.press(&self.player));
        assert_eq!(self.logic.state(), FishingState::Charging);
        assert!(self.logic.meter().is_some());

        let held = FishingInput {
            reel: true,
            ..Default::default()
        };
        for _ in 0..50 {
            self.tick(held);
        }
        let accuracy = self.logic.meter().unwrap().accuracy();
        assert!(self.logic.release());
        assert_eq!(self.logic.state(), FishingState::Casting);
        assert_eq!(self.logic.charge_power(), accuracy);
        assert!(self.logic.meter().is_none());

        self.tick_until(FishingInput::default(), |l| l.state() == FishingState::Waiting);
        let float = *self.logic.line().unwrap().float();
        assert_eq!(float.x, self.player.x + self.player.w / 2);
        assert_eq!(float.y, self.player.y - (accuracy * 100.0).round() as i32);

        self.tick_until(FishingInput::default(), |l| l.fish().is_some());
        let fish = self.logic.fish_mut().unwrap();
        fish.body.x = float.x;
        fish.body.y = float.y;
        assert!(self.logic.check_bite());
        for _ in 0..5 {
            assert!(!self.logic.check_bite());
        }
        assert!(self.logic.fish().unwrap().is_hooked());

        self.tick_until(FishingInput::default(), |l| l.state() == FishingState::Reeling);
        assert!(!self.logic.fish().unwrap().body.visible);
        accuracy
    }

    /// Lets the fish pull the float out of the safe band until the line snaps.
    fn snap_line(&mut self) {
        self.tick_until(FishingInput::default(), |l| {
            l.line().map_or(false, |line| line.is_game_over())
        });
        assert_eq!(self.logic.state(), FishingState::Reeling);
    }
}

#[test]
fn snapped_line_loses_the_fish() {
    let mut s = Session::new(2024);
    s.hook_a_fish();
    s.snap_line();

    let event = s.logic.check_landing(&s.player);
    assert_eq!(
        event,
        Some(FishingEvent::Lost {
            name: "Pike".into()
        })
    );
    assert_eq!(s.logic.state(), FishingState::Idle);
    assert!(s.logic.line().is_none());
    assert!(s.logic.fish().is_none());
}

#[test]
fn reeled_in_float_lands_the_fish() {
    let mut s = Session::new(77);
    let power = s.hook_a_fish();
    s.snap_line();
    let base_weight = s.logic.fish().unwrap().weight();

    // the float has been brought to the player
    s.player = *s.logic.line().unwrap().float();
    assert_eq!(s.logic.check_landing(&s.player), None);
    assert_eq!(s.logic.state(), FishingState::Caught);

    let mut caught = None;
    for _ in 0..200 {
        if let Some(event) = s.tick(FishingInput::default()) {
            caught = Some(event);
            break;
        }
    }
    let expected = (base_weight as f32 * (1.0 + power / 2.0)).round() as i32;
    assert_eq!(
        caught,
        Some(FishingEvent::Caught {
            name: "Pike".into(),
            weight: expected
        })
    );
    assert_eq!(s.logic.state(), FishingState::Idle);
    assert!(s.logic.fish().is_none());
    assert!(s.logic.line().is_none());
}

#[test]
fn escape_mid_fight_resets() {
    let mut s = Session::new(5);
    s.hook_a_fish();
    for _ in 0..10 {
        s.tick(FishingInput {
            left: true,
            ..Default::default()
        });
    }
    assert!(s.logic.abort());
    assert_eq!(s.logic.state(), FishingState::Inactive);
    assert!(s.logic.line().is_none());
    assert!(s.logic.fish().is_none());
    assert_eq!(s.tick(FishingInput::default()), None);
}
