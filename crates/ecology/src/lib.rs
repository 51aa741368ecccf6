//! Fish selection and the live fish that swims to the float.

use std::sync::Arc;

use animation::{Animator, FrameSet, DEFAULT_ANIMATION_SPEED};
use bracket_lib::prelude::RandomNumberGenerator;
use common::{bearing, Entity, GameResult, Point};
use data::FishSpecies;

/// Units per tick a fish swims toward the float.
pub const FISH_SPEED: i32 = 5;
/// Full passes over the pool before selection falls back to a uniform pick.
pub const MAX_SELECTION_SCANS: usize = 1000;
/// Rarity draws are uniform in `0..RARITY_SCALE`.
pub const RARITY_SCALE: u32 = 10;

pub const SWIM_STATE: &str = "idle";
pub const HOOKED_STATE: &str = "sinking";

/// Animation states every fish sprite must provide.
pub const FISH_STATES: [&str; 2] = [SWIM_STATE, HOOKED_STATE];

/// Picks the species that bites by rejection sampling over `pool`.
///
/// Each pass draws once per candidate and takes the first one whose draw
/// falls under its rarity, so earlier entries win ties within a pass.
/// Returns `None` only for an empty pool.
pub fn select_species<'a>(
    pool: &'a [FishSpecies],
    rng: &mut RandomNumberGenerator,
) -> Option<&'a FishSpecies> {
    if pool.is_empty() {
        return None;
    }
    for _ in 0..MAX_SELECTION_SCANS {
        for candidate in pool {
            if rng.range(0, RARITY_SCALE) < candidate.rarity {
                return Some(candidate);
            }
        }
    }
    tracing::warn!(
        pool = pool.len(),
        scans = MAX_SELECTION_SCANS,
        "no species accepted, falling back to uniform pick"
    );
    pool.get(rng.range(0, pool.len()))
}

/// A fish that has been selected to bite.
#[derive(Clone, Debug)]
pub struct Fish {
    pub species: FishSpecies,
    pub body: Entity,
    weight: i32,
    hooked: bool,
    has_been_hooked: bool,
    angle: i32,
    target: Point,
    pub animator: Animator,
}

impl Fish {
    /// Places a fish of `species` somewhere in `water`, facing `target`.
    ///
    /// The weight is drawn from `min_weight..max_weight` and sets the
    /// sprite size.
    pub fn spawn(
        species: FishSpecies,
        water: &Entity,
        target: Point,
        frames: Arc<FrameSet>,
        rng: &mut RandomNumberGenerator,
    ) -> GameResult<Self> {
        frames.require(&FISH_STATES)?;
        let animator = Animator::new(frames, SWIM_STATE, DEFAULT_ANIMATION_SPEED)?;
        let weight = rng.range(species.min_weight, species.max_weight);
        let x = rng.range(water.x, water.right());
        let y = rng.range(water.y, water.bottom());
        let body = Entity::new(x, y, 10 + weight, 10 + weight * 2);
        let mut fish = Self {
            species,
            body,
            weight,
            hooked: false,
            has_been_hooked: false,
            angle: 0,
            target,
            animator,
        };
        fish.face(target);
        tracing::debug!(fish = %fish.species.name, weight, x, y, "fish spawned");
        Ok(fish)
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Scales the weight by a catch-quality multiplier, rounding.
    pub fn apply_multiplier(&mut self, multiplier: f32) -> i32 {
        self.weight = (self.weight as f32 * multiplier).round() as i32;
        self.weight
    }

    pub fn is_hooked(&self) -> bool {
        self.hooked
    }

    /// Compass bearing from the fish's head to its target.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    fn head(&self) -> Point {
        Point::new(self.body.center_x(), self.body.y)
    }

    fn face(&mut self, target: Point) {
        self.target = target;
        self.angle = bearing(self.head(), target);
    }

    /// Swims toward `target` unless already hooked.
    pub fn update(&mut self, target: Point) {
        if !self.hooked {
            self.body.move_towards(target, FISH_SPEED);
        }
        self.face(target);
    }

    /// Bites the float. Only the first call has an effect; returns whether
    /// it did.
    pub fn hook(&mut self) -> bool {
        if self.has_been_hooked {
            return false;
        }
        if let Err(e) = self.animator.set_state(HOOKED_STATE) {
            tracing::error!("fish cannot play hook animation: {}", e);
        }
        self.animator.refresh();
        self.hooked = true;
        self.has_been_hooked = true;
        tracing::info!(fish = %self.species.name, "fish hooked");
        true
    }

    /// `true` once the hook animation has played through.
    pub fn hook_finished(&self) -> bool {
        self.hooked && self.animator.is_complete()
    }

    pub fn animate(&mut self) {
        self.animator.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(name: &str, rarity: u32, min: i32, max: i32) -> FishSpecies {
        FishSpecies {
            name: name.into(),
            habitat: "Lake".into(),
            rarity,
            min_weight: min,
            max_weight: max,
            sprite: String::new(),
            trophy_caught: String::new(),
            trophy_uncaught: String::new(),
        }
    }

    fn frames() -> Arc<FrameSet> {
        Arc::new(FrameSet::synthetic("fish", &[(SWIM_STATE, 2), (HOOKED_STATE, 3)]))
    }

    fn water() -> Entity {
        Entity::new(100, 500, 800, 300)
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let mut rng = RandomNumberGenerator::seeded(1);
        assert!(select_species(&[], &mut rng).is_none());
    }

    #[test]
    fn zero_rarity_pool_falls_back() {
        let pool = [species("Ghost", 0, 1, 2)];
        let mut rng = RandomNumberGenerator::seeded(2);
        assert_eq!(select_species(&pool, &mut rng).map(|s| s.name.as_str()), Some("Ghost"));
    }

    #[test]
    fn rarer_species_selected_less_often() {
        let pool = [species("Rare", 1, 1, 2), species("Common", 9, 1, 2)];
        let mut rng = RandomNumberGenerator::seeded(42);
        let mut rare = 0;
        let mut common = 0;
        for _ in 0..10_000 {
            match select_species(&pool, &mut rng).map(|s| s.name.as_str()) {
                Some("Rare") => rare += 1,
                Some("Common") => common += 1,
                other => panic!("unexpected {:?}", other),
            }
        }
        let ratio = common as f64 / rare as f64;
        assert!((6.0..12.0).contains(&ratio), "ratio {}", ratio);
    }

    #[test]
    fn spawn_weights_are_uniform_and_max_exclusive() {
        let mut rng = RandomNumberGenerator::seeded(7);
        let mut counts = [0u32; 10];
        for _ in 0..10_000 {
            let fish = Fish::spawn(species("A", 5, 1, 10), &water(), Point::new(0, 0), frames(), &mut rng)
                .unwrap();
            assert!((1..10).contains(&fish.weight()));
            counts[fish.weight() as usize] += 1;
        }
        assert_eq!(counts[0], 0);
        let expected = 10_000.0 / 9.0;
        let chi: f64 = counts[1..]
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 8 degrees of freedom; 26.1 is the 0.1% critical value
        assert!(chi < 26.1, "chi-square {}", chi);
    }

    #[test]
    fn spawn_places_fish_in_water() {
        let mut rng = RandomNumberGenerator::seeded(3);
        for _ in 0..200 {
            let fish = Fish::spawn(species("A", 5, 2, 6), &water(), Point::new(500, 400), frames(), &mut rng)
                .unwrap();
            let w = water();
            assert!(fish.body.x >= w.x && fish.body.x < w.right());
            assert!(fish.body.y >= w.y && fish.body.y < w.bottom());
            assert_eq!(fish.body.w, 10 + fish.weight());
            assert_eq!(fish.body.h, 10 + 2 * fish.weight());
            assert!(fish.body.visible);
        }
    }

    #[test]
    fn spawn_requires_fish_animations() {
        let mut rng = RandomNumberGenerator::seeded(3);
        let bare = Arc::new(FrameSet::synthetic("fish", &[(SWIM_STATE, 1)]));
        assert!(Fish::spawn(species("A", 5, 1, 2), &water(), Point::new(0, 0), bare, &mut rng).is_err());
    }

    #[test]
    fn fish_swims_to_target() {
        let mut rng = RandomNumberGenerator::seeded(9);
        let mut fish = Fish::spawn(species("A", 5, 1, 2), &water(), Point::new(0, 0), frames(), &mut rng)
            .unwrap();
        let target = Point::new(fish.body.x + 12, fish.body.y);
        fish.update(target);
        assert_eq!(fish.body.x, target.x - 12 + FISH_SPEED);
        fish.update(target);
        fish.update(target);
        assert_eq!((fish.body.x, fish.body.y), (target.x, target.y));
    }

    #[test]
    fn hook_is_one_shot() {
        let mut rng = RandomNumberGenerator::seeded(5);
        let mut fish = Fish::spawn(species("A", 5, 1, 2), &water(), Point::new(0, 0), frames(), &mut rng)
            .unwrap();
        assert!(fish.hook());
        assert!(!fish.hook());
        assert!(fish.is_hooked());
        assert_eq!(fish.animator.state(), HOOKED_STATE);
        let before = (fish.body.x, fish.body.y);
        fish.update(Point::new(0, 0));
        assert_eq!((fish.body.x, fish.body.y), before);
    }

    #[test]
    fn hook_animation_completes() {
        let mut rng = RandomNumberGenerator::seeded(5);
        let mut fish = Fish::spawn(species("A", 5, 1, 2), &water(), Point::new(0, 0), frames(), &mut rng)
            .unwrap();
        fish.hook();
        let mut ticks = 0;
        while !fish.hook_finished() {
            fish.animate();
            ticks += 1;
            assert!(ticks < 100);
        }
    }

    #[test]
    fn multiplier_rounds() {
        let mut rng = RandomNumberGenerator::seeded(5);
        let mut fish = Fish::spawn(species("A", 5, 7, 8), &water(), Point::new(0, 0), frames(), &mut rng)
            .unwrap();
        assert_eq!(fish.apply_multiplier(1.25), 9);
    }
}
