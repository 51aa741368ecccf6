//! Game engine entry point.
//!
//! [`ReelhavenGame`] owns the world and runs one simulation tick per
//! [`ReelhavenGame::step`]. Everything toolkit-specific stays in the app
//! shell and the renderer.

mod app;
mod clock;
mod config;
mod input;
mod render;
mod types;

use std::sync::Arc;

use animation::{AssetLoader, DirectoryAssets, Frame, FrameSet, MemoryAssets};
use bracket_lib::prelude::{main_loop, BError, BTermBuilder, RandomNumberGenerator};
use codex::{CatchStore, Codex, TrophyRecord};
use common::{Entity, GameResult, Point};
use data::FishSpecies;
use ecology::FISH_STATES;
use fishing::{FishingEvent, FishingInput, FishingLogic, PLAYER_FISHING_STATES};
use level::{Level, LevelSource};
use physics::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use physics::{collide_all, Camera};
use ui::{ColorPalette, UIContext, UILayout};

pub use app::ReelhavenApp;
pub use clock::DayClock;
pub use config::{GameConfig, InputConfig};
pub use input::{HeldKeys, InputPoller, InputState};
pub use types::Player;

const CONFIG_PATH: &str = "reelhaven.toml";
/// Frames, and so simulation ticks, per second. Every timer counts ticks.
pub const TICK_RATE: f32 = 60.0;
/// Animation key shared by every fish.
const FISH_ASSET: &str = "fish";
const START_POS: Point = Point { x: 885, y: 465 };
const SHELF_CLEARANCE: i32 = 1;
const BUILTIN_BACKGROUNDS: [&str; 3] = ["house", "lake", "river"];

/// Screen the game wants the app shell to switch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellRequest {
    Pause,
    Trophies,
}

/// The whole simulation.
pub struct ReelhavenGame {
    player: Player,
    level: Level,
    /// Resolved image for `level.background`.
    backdrop: Frame,
    levels: LevelSource,
    camera: Camera,
    fishing: FishingLogic,
    codex: Codex,
    pool: Vec<FishSpecies>,
    ui: UIContext,
    clock: DayClock,
    rng: RandomNumberGenerator,
    assets: Box<dyn AssetLoader>,
    palette: ColorPalette,
    debug: bool,
    god: bool,
    request: Option<ShellRequest>,
}

/// Placeholder art used when no asset directory is configured.
pub fn builtin_assets() -> MemoryAssets {
    let mut assets = builtin_sprites();
    for name in BUILTIN_BACKGROUNDS {
        let key = format!("backgrounds/{}.png", name);
        let still = FrameSet::synthetic(&key, &[("still", 1)]);
        assets.insert(key, still);
    }
    assets
}

fn builtin_sprites() -> MemoryAssets {
    let movement = types::movement_states();
    let mut player: Vec<(&str, usize)> = movement.iter().map(|s| (s.as_str(), 4)).collect();
    player.extend(PLAYER_FISHING_STATES.iter().map(|s| (*s, 3)));
    let fish: Vec<(&str, usize)> = vec![(FISH_STATES[0], 2), (FISH_STATES[1], 4)];
    MemoryAssets::new()
        .with("player", FrameSet::synthetic("player", &player))
        .with(FISH_ASSET, FrameSet::synthetic(FISH_ASSET, &fish))
}

/// Loads the still image a level is drawn over.
fn resolve_backdrop(assets: &dyn AssetLoader, level: &Level) -> GameResult<Frame> {
    assets.frame(&level.background).map_err(|e| {
        tracing::error!(level = %level.name, background = %level.background, "backdrop missing");
        e
    })
}

impl ReelhavenGame {
    /// Builds the game from a loaded configuration.
    pub fn new(cfg: &GameConfig, rng: RandomNumberGenerator) -> GameResult<Self> {
        let levels = match &cfg.levels_dir {
            Some(dir) => LevelSource::Directory(dir.clone()),
            None => LevelSource::Embedded,
        };
        let assets: Box<dyn AssetLoader> = match &cfg.assets_dir {
            Some(dir) => Box::new(DirectoryAssets::new(dir.clone())),
            None => Box::new(builtin_assets()),
        };
        let codex = {
            #[cfg(target_arch = "wasm32")]
            {
                Codex::in_memory(data::load_species_embedded()?)
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/fish.json");
                Codex::load(data::load_species(path)?, cfg.codex_path.clone())?
            }
        };
        Self::with_parts(levels, assets, codex, &cfg.start_level, rng)
    }

    /// Builds the game from explicit collaborators.
    pub fn with_parts(
        levels: LevelSource,
        assets: Box<dyn AssetLoader>,
        codex: Codex,
        start_level: &str,
        rng: RandomNumberGenerator,
    ) -> GameResult<Self> {
        let level = levels.load(start_level)?;
        let backdrop = resolve_backdrop(assets.as_ref(), &level)?;
        let player_frames = Arc::new(assets.animations(&level.player)?);
        let fish_frames = Arc::new(assets.animations(FISH_ASSET)?);
        let body = Entity::new(START_POS.x, START_POS.y, level.player_width, level.player_height);
        let player = Player::new(body, player_frames)?;
        let fishing = FishingLogic::new(fish_frames)?;
        let camera = Camera::new(level.camera_bounds, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let pool = habitat_pool(&codex, &level);
        let mut ui = UIContext::default();
        ui.add_log("Welcome to Reelhaven!");
        Ok(Self {
            player,
            level,
            backdrop,
            levels,
            camera,
            fishing,
            codex,
            pool,
            ui,
            clock: DayClock::new(0.5),
            rng,
            assets,
            palette: ColorPalette::default(),
            debug: false,
            god: false,
            request: None,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn backdrop(&self) -> &Frame {
        &self.backdrop
    }

    pub fn fishing(&self) -> &FishingLogic {
        &self.fishing
    }

    pub fn codex(&self) -> &Codex {
        &self.codex
    }

    pub fn ui(&self) -> &UIContext {
        &self.ui
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_god(&self) -> bool {
        self.god
    }

    /// Species that can bite in the current level.
    pub fn pool(&self) -> &[FishSpecies] {
        &self.pool
    }

    pub fn trophies(&self) -> Vec<TrophyRecord> {
        self.codex.all_records()
    }

    /// Hands the pending screen switch to the app shell.
    pub fn take_request(&mut self) -> Option<ShellRequest> {
        self.request.take()
    }

    /// Back to play after the pause or trophy screen.
    pub fn resume(&mut self) {
        let layout = if self.fishing.is_active() {
            UILayout::Fishing
        } else {
            UILayout::Standard
        };
        self.ui.set_layout(layout);
    }

    /// Swaps in `level` with the player standing at `to`.
    fn enter_level(&mut self, level: Level, to: Point) -> GameResult<()> {
        let backdrop = resolve_backdrop(self.assets.as_ref(), &level)?;
        let body = Entity::new(to.x, to.y, level.player_width, level.player_height);
        if level.player != self.level.player {
            let frames = Arc::new(self.assets.animations(&level.player)?);
            self.player = Player::new(body, frames)?;
        }
        self.stop_fishing();
        self.player.body = body;
        self.camera.set_bounds_ratio(level.camera_bounds);
        self.pool = habitat_pool(&self.codex, &level);
        tracing::info!(from = %self.level.name, to = %level.name, x = to.x, y = to.y, "level change");
        self.level = level;
        self.backdrop = backdrop;
        Ok(())
    }

    /// Leaves the fishing minigame and frees the spot.
    fn stop_fishing(&mut self) {
        self.fishing.abort();
        self.level.reset_fishing_spots();
        self.player.is_fishing = false;
        self.player.animator.set_speed(animation::DEFAULT_ANIMATION_SPEED);
        self.ui.set_layout(UILayout::Standard);
    }

    fn handle_event(&mut self, event: FishingEvent) {
        match event {
            FishingEvent::Caught { name, weight } => {
                self.ui.announce_catch(&name, weight, self.player.body.y);
                self.ui.add_log(&format!("Caught a {} weighing {}lb!", name, weight));
                match self.codex.record_catch(&name, weight) {
                    Ok(true) => self.ui.add_log("A new personal best!"),
                    Ok(false) => {}
                    Err(e) => tracing::warn!(fish = %name, weight, "could not record catch: {}", e),
                }
            }
            FishingEvent::Lost { name } => {
                self.ui.add_log(&format!("The line snapped. The {} got away.", name));
            }
        }
    }

    /// Follows the first armed door, if any. Every door's flag is consumed.
    fn check_level_change(&mut self) {
        let mut target = None;
        for door in &mut self.level.doors {
            if let Some(path) = door.level_changed() {
                target.get_or_insert((path, door.destination()));
            }
        }
        let Some((path, to)) = target else {
            return;
        };
        let result = self
            .levels
            .load(&path)
            .and_then(|level| self.enter_level(level, to));
        if let Err(e) = result {
            tracing::error!(level = %path, "could not change level: {}", e);
            self.ui.add_log("The way is blocked.");
        }
    }

    fn check_fishing(&mut self) {
        if self.fishing.is_active() || !self.level.any_spot_active() {
            return;
        }
        if self.fishing.enter_spot() {
            self.player.is_fishing = true;
            self.player.body.set_velocity(0, 0);
            self.ui.set_layout(UILayout::Fishing);
            self.ui.add_log("Hold the button to charge a cast.");
        }
    }

    fn collide(&mut self) {
        let body = &mut self.player.body;
        collide_all(body, &mut self.level.obstacles, 0);
        collide_all(body, &mut self.level.shelves, SHELF_CLEARANCE);
        collide_all(body, &mut self.level.doors, 0);
        collide_all(body, &mut self.level.fishing_spots, 0);
    }

    /// Runs one fixed tick.
    pub fn step(&mut self, input: &InputState) {
        self.ui.update_texts();
        self.clock.tick();

        if input.toggle_debug {
            self.debug = !self.debug;
            tracing::info!(debug = self.debug, "debug overlay");
        }
        if input.toggle_god {
            self.god = !self.god;
            tracing::info!(god = self.god, "god mode");
        }

        if input.cancel {
            if self.fishing.is_active() {
                self.stop_fishing();
                self.ui.add_log("You reel in and step away.");
            } else {
                self.ui.set_layout(UILayout::Paused);
                self.request = Some(ShellRequest::Pause);
                return;
            }
        }

        if input.primary_pressed {
            self.fishing.press(&self.player.body);
        }
        if input.primary_released {
            self.fishing.release();
        }

        let fishing_input = FishingInput {
            reel: input.primary,
            left: input.left,
            right: input.right,
        };
        let result = self.fishing.update(
            fishing_input,
            &self.player.body,
            &mut self.player.animator,
            &self.pool,
            self.level.water.as_ref(),
            &mut self.rng,
        );
        match result {
            Ok(Some(event)) => self.handle_event(event),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(state = ?self.fishing.state(), "fishing stopped: {}", e);
                self.stop_fishing();
            }
        }

        self.check_level_change();
        self.check_fishing();

        if self.fishing.is_active() {
            self.player.body.set_velocity(0, 0);
        } else {
            self.player.steer(input.left, input.right, input.up, input.down);
        }
        self.player.body.step();

        let delta = self.camera.follow(&mut self.player.body);
        self.level.shift(delta);
        self.fishing.shift(delta);

        if !self.god {
            self.collide();
        }

        if let Some(event) = self.fishing.check_landing(&self.player.body) {
            self.handle_event(event);
        }
        if self.fishing.check_bite() {
            self.ui.add_log("Something bit!");
        }

        let mut opened = false;
        for shelf in &mut self.level.shelves {
            opened |= shelf.take_opened();
        }
        if opened && self.request.is_none() {
            self.ui.set_layout(UILayout::Trophies);
            self.request = Some(ShellRequest::Trophies);
        }

        self.fishing.animate();
        if let Err(e) = self.player.update_animation() {
            tracing::error!("player animation: {}", e);
        }
        self.player.animator.advance();
    }
}

fn habitat_pool(store: &impl CatchStore, level: &Level) -> Vec<FishSpecies> {
    match &level.habitat {
        Some(habitat) => store.candidates_by_habitat(habitat),
        None => Vec::new(),
    }
}

/// Starts the game loop.
pub fn run() -> BError {
    let cfg = GameConfig::load(CONFIG_PATH)?;
    let game = ReelhavenGame::new(&cfg, RandomNumberGenerator::new())?;
    tracing::info!(level = %game.level().name, "starting");

    let context = BTermBuilder::simple(80, 45)?
        .with_title("Reelhaven")
        .with_advanced_input(true)
        .with_fps_cap(TICK_RATE)
        .build()?;
    let gs = ReelhavenApp::new(game, cfg.input);
    main_loop(context, gs)
}
