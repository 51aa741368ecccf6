use std::path::PathBuf;

use bracket_lib::prelude::VirtualKeyCode;
use common::GameResult;
use level::START_LEVEL;

/// Keyboard bindings. Arrow keys always move as well.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputConfig {
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    /// Keyboard stand-in for the primary mouse button.
    pub cast: VirtualKeyCode,
    pub cancel: VirtualKeyCode,
    pub debug: VirtualKeyCode,
    pub god: VirtualKeyCode,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: A,
            right: D,
            up: W,
            down: S,
            cast: Space,
            cancel: Escape,
            debug: F1,
            god: F2,
        }
    }
}

/// Settings read from `reelhaven.toml`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub input: InputConfig,
    pub codex_path: PathBuf,
    pub start_level: String,
    /// Level JSON directory; the built-in levels are used when unset.
    pub levels_dir: Option<PathBuf>,
    /// Art directory; placeholder art is used when unset.
    pub assets_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            codex_path: PathBuf::from("codex.json"),
            start_level: START_LEVEL.to_string(),
            levels_dir: None,
            assets_dir: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path, "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::parse(&data))
    }

    /// Parses `key = value` lines, skipping comments and unknown keys.
    pub fn parse(data: &str) -> Self {
        let mut cfg = Self::default();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            match key {
                "codex_path" => cfg.codex_path = PathBuf::from(val),
                "start_level" => cfg.start_level = val.to_string(),
                "levels_dir" => cfg.levels_dir = Some(PathBuf::from(val)),
                "assets_dir" => cfg.assets_dir = Some(PathBuf::from(val)),
                _ if is_binding(key) => {
                    let Some(kc) = parse_key(val) else {
                        tracing::warn!(key, value = val, "unknown key name in config");
                        continue;
                    };
                    let input = &mut cfg.input;
                    let slot = match key {
                        "left" => &mut input.left,
                        "right" => &mut input.right,
                        "up" => &mut input.up,
                        "down" => &mut input.down,
                        "cast" => &mut input.cast,
                        "cancel" => &mut input.cancel,
                        "debug" => &mut input.debug,
                        _ => &mut input.god,
                    };
                    *slot = kc;
                }
                _ => tracing::warn!(key, "unknown config key"),
            }
        }
        cfg
    }
}

/// Config keys that name a key binding.
const BINDINGS: [&str; 8] = ["left", "right", "up", "down", "cast", "cancel", "debug", "god"];

fn is_binding(key: &str) -> bool {
    BINDINGS.contains(&key)
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    let key = match name.to_ascii_lowercase().as_str() {
        "left" => Left,
        "right" => Right,
        "up" => Up,
        "down" => Down,
        "a" => A,
        "d" => D,
        "w" => W,
        "s" => S,
        "h" => H,
        "j" => J,
        "k" => K,
        "l" => L,
        "c" => C,
        "x" => X,
        "z" => Z,
        "space" => Space,
        "return" | "enter" => Return,
        "escape" | "esc" => Escape,
        "tab" => Tab,
        "f1" => F1,
        "f2" => F2,
        "f3" => F3,
        "f4" => F4,
        _ => return None,
    };
    Some(key)
}
