//! Level data: static obstacles, doors, fishing spots and water.

mod objects;

use std::path::PathBuf;

use common::{Entity, GameError, GameResult, Point};
use physics::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use serde::Deserialize;

pub use objects::{Door, FishingSpot, Light, LightKind, Shelf};

/// Level the game starts in.
pub const START_LEVEL: &str = "house";

/// Everything a level file describes.
#[derive(Clone, Debug, Deserialize)]
pub struct Level {
    #[serde(skip)]
    pub name: String,
    /// Asset key of the backdrop image.
    pub background: String,
    #[serde(skip, default = "full_screen")]
    pub backdrop: Entity,
    /// Asset key of the player's animation folder.
    pub player: String,
    pub player_width: i32,
    pub player_height: i32,
    /// Fraction of the viewport used as the camera dead zone.
    #[serde(default)]
    pub camera_bounds: f32,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub obstacles: Vec<Entity>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub fishing_spots: Vec<FishingSpot>,
    #[serde(default)]
    pub water: Option<Entity>,
    #[serde(default)]
    pub shelves: Vec<Shelf>,
    #[serde(default)]
    pub lights: Vec<Light>,
}

fn full_screen() -> Entity {
    Entity::new(0, 0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
}

impl Level {
    /// Checks the invariants the rest of the game relies on.
    pub fn validate(&self) -> GameResult<()> {
        if self.player_width <= 0 || self.player_height <= 0 {
            return Err(GameError::Level(format!(
                "{}: player size must be positive",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.camera_bounds) {
            return Err(GameError::Level(format!(
                "{}: camera_bounds {} outside 0..=1",
                self.name, self.camera_bounds
            )));
        }
        let bodies = self
            .obstacles
            .iter()
            .chain(self.doors.iter().map(|d| &d.body))
            .chain(self.fishing_spots.iter().map(|s| &s.body))
            .chain(self.shelves.iter().map(|s| &s.body))
            .chain(self.water.iter());
        for body in bodies {
            if body.w <= 0 || body.h <= 0 {
                return Err(GameError::Level(format!(
                    "{}: object at ({}, {}) has no area",
                    self.name, body.x, body.y
                )));
            }
        }
        if !self.fishing_spots.is_empty() && (self.water.is_none() || self.habitat.is_none()) {
            return Err(GameError::Level(format!(
                "{}: fishing spots need water and a habitat",
                self.name
            )));
        }
        Ok(())
    }

    /// Applies a camera shift to every world-space object.
    pub fn shift(&mut self, delta: Point) {
        if delta.is_zero() {
            return;
        }
        self.backdrop.move_by(delta.x, delta.y);
        for obstacle in &mut self.obstacles {
            obstacle.move_by(delta.x, delta.y);
        }
        for door in &mut self.doors {
            door.body.move_by(delta.x, delta.y);
        }
        for spot in &mut self.fishing_spots {
            spot.body.move_by(delta.x, delta.y);
        }
        for shelf in &mut self.shelves {
            shelf.body.move_by(delta.x, delta.y);
        }
        if let Some(water) = &mut self.water {
            water.move_by(delta.x, delta.y);
        }
        for light in &mut self.lights {
            light.x += delta.x;
            light.y += delta.y;
        }
    }

    /// Clears the armed flag on every fishing spot.
    pub fn reset_fishing_spots(&mut self) {
        for spot in &mut self.fishing_spots {
            spot.set_active(false);
        }
    }

    /// `true` if the player has stepped onto any fishing spot.
    pub fn any_spot_active(&self) -> bool {
        self.fishing_spots.iter().any(FishingSpot::is_active)
    }
}

/// Parses and validates a level document.
pub fn parse_level(name: &str, data: &str) -> GameResult<Level> {
    let mut level: Level = serde_json::from_str(data)?;
    level.name = name.to_string();
    level.validate()?;
    Ok(level)
}

/// Loads a level JSON file from disk.
pub fn load_level(path: &str) -> GameResult<Level> {
    let data = std::fs::read_to_string(path)?;
    let name = std::path::Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    parse_level(name, &data)
}

/// Loads a level compiled into the binary (used on WASM).
pub fn load_level_embedded(name: &str) -> GameResult<Level> {
    let data = match name {
        "house" => include_str!("../../../assets/levels/house.json"),
        "lake" => include_str!("../../../assets/levels/lake.json"),
        "river" => include_str!("../../../assets/levels/river.json"),
        other => return Err(GameError::Level(format!("unknown level `{}`", other))),
    };
    parse_level(name, data)
}

/// Where named levels come from.
#[derive(Clone, Debug)]
pub enum LevelSource {
    Directory(PathBuf),
    Embedded,
}

impl LevelSource {
    pub fn load(&self, name: &str) -> GameResult<Level> {
        let result = match self {
            LevelSource::Directory(root) => {
                let path = root.join(format!("{}.json", name));
                load_level(&path.display().to_string())
            }
            LevelSource::Embedded => load_level_embedded(name),
        };
        match &result {
            Ok(level) => tracing::info!(
                level = name,
                obstacles = level.obstacles.len(),
                doors = level.doors.len(),
                spots = level.fishing_spots.len(),
                "level loaded"
            ),
            Err(e) => tracing::error!(level = name, "level load failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "background": "lake",
        "player": "player",
        "player_width": 100,
        "player_height": 100,
        "camera_bounds": 0.75,
        "habitat": "Lake",
        "obstacles": [{"x": 0, "y": 0, "w": 10, "h": 10}],
        "doors": [{"x": 5, "y": 5, "w": 20, "h": 20, "path": "house", "to_x": 100, "to_y": 200}],
        "fishing_spots": [{"x": 50, "y": 50, "w": 30, "h": 30}],
        "water": {"x": 0, "y": 400, "w": 1920, "h": 300}
    }"#;

    #[test]
    fn parse_sample_level() {
        let level = parse_level("sample", SAMPLE).expect("level");
        assert_eq!(level.name, "sample");
        assert_eq!(level.obstacles.len(), 1);
        assert_eq!(level.doors[0].path, "house");
        assert_eq!(level.doors[0].destination(), Point::new(100, 200));
        assert_eq!(level.habitat.as_deref(), Some("Lake"));
        assert!(level.shelves.is_empty());
        assert_eq!(level.backdrop, Entity::new(0, 0, 1920, 1080));
    }

    #[test]
    fn parse_failure_is_reported() {
        assert!(matches!(parse_level("bad", "{"), Err(GameError::Json(_))));
    }

    #[test]
    fn spots_without_water_are_rejected() {
        let doc = r#"{"background":"b","player":"p","player_width":1,"player_height":1,
            "habitat":"Lake","fishing_spots":[{"x":0,"y":0,"w":1,"h":1}]}"#;
        assert!(matches!(parse_level("dry", doc), Err(GameError::Level(_))));
    }

    #[test]
    fn camera_bounds_checked() {
        let doc = r#"{"background":"b","player":"p","player_width":1,"player_height":1,
            "camera_bounds":1.5}"#;
        assert!(parse_level("wide", doc).is_err());
    }

    #[test]
    fn shift_moves_world_objects() {
        let mut level = parse_level("sample", SAMPLE).unwrap();
        level.shift(Point::new(-9, 3));
        assert_eq!((level.obstacles[0].x, level.obstacles[0].y), (-9, 3));
        assert_eq!(level.doors[0].body.x, -4);
        assert_eq!(level.fishing_spots[0].body.y, 53);
        assert_eq!(level.water.unwrap().x, -9);
        assert_eq!(level.backdrop.x, -9);
    }

    #[test]
    fn spot_flags_reset() {
        let mut level = parse_level("sample", SAMPLE).unwrap();
        level.fishing_spots[0].set_active(true);
        assert!(level.any_spot_active());
        level.reset_fishing_spots();
        assert!(!level.any_spot_active());
    }

    #[test]
    fn embedded_levels_load() {
        for name in ["house", "lake", "river"] {
            let level = load_level_embedded(name).expect(name);
            assert_eq!(level.name, name);
        }
        assert!(load_level_embedded("moon").is_err());
    }

    #[test]
    fn directory_source_matches_embedded() {
        let root = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/levels"));
        let level = LevelSource::Directory(root).load("lake").expect("lake");
        assert!(level.water.is_some());
        assert!(!level.fishing_spots.is_empty());
    }

    #[test]
    fn embedded_doors_lead_to_known_levels() {
        for name in ["house", "lake", "river"] {
            let level = load_level_embedded(name).unwrap();
            for door in &level.doors {
                assert!(load_level_embedded(&door.path).is_ok(), "{} -> {}", name, door.path);
            }
        }
    }
}
