//! Codex of personal-best catches.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use common::GameResult;
use data::FishSpecies;

/// One row of the trophy view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrophyRecord {
    pub name: String,
    /// Heaviest catch so far, `0` if never caught.
    pub best_weight: i32,
    /// Sprite key matching the caught/uncaught state.
    pub sprite: String,
}

impl TrophyRecord {
    pub fn is_caught(&self) -> bool {
        self.best_weight > 0
    }
}

/// Storage the fishing session reads species from and writes catches to.
pub trait CatchStore {
    /// Species that can bite in `habitat`, most common first.
    fn candidates_by_habitat(&self, habitat: &str) -> Vec<FishSpecies>;

    fn all_records(&self) -> Vec<TrophyRecord>;

    /// Stores `weight` if it beats the current best. Returns whether it did.
    fn record_catch(&mut self, name: &str, weight: i32) -> GameResult<bool>;
}

/// Species catalogue plus personal bests, optionally backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Codex {
    species: Vec<FishSpecies>,
    records: HashMap<String, i32>,
    path: Option<PathBuf>,
}

impl Codex {
    /// Loads bests from `path`; a missing file is an empty codex.
    pub fn load(species: Vec<FishSpecies>, path: impl Into<PathBuf>) -> GameResult<Self> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(path = %path.display(), records = records.len(), "codex loaded");
        Ok(Self {
            species,
            records,
            path: Some(path),
        })
    }

    /// Codex that never touches the disk (used on WASM and in tests).
    pub fn in_memory(species: Vec<FishSpecies>) -> Self {
        Self {
            species,
            records: HashMap::new(),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn best(&self, name: &str) -> i32 {
        self.records.get(name).copied().unwrap_or(0)
    }

    pub fn species(&self) -> &[FishSpecies] {
        &self.species
    }

    fn save(&self) -> GameResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        // sorted so the file diffs cleanly
        let sorted: BTreeMap<_, _> = self.records.iter().collect();
        std::fs::write(path, serde_json::to_string_pretty(&sorted)?)?;
        Ok(())
    }
}

impl CatchStore for Codex {
    fn candidates_by_habitat(&self, habitat: &str) -> Vec<FishSpecies> {
        data::candidates_by_habitat(&self.species, habitat)
    }

    fn all_records(&self) -> Vec<TrophyRecord> {
        self.species
            .iter()
            .map(|s| {
                let best_weight = self.best(&s.name);
                let sprite = if best_weight > 0 {
                    &s.trophy_caught
                } else {
                    &s.trophy_uncaught
                };
                TrophyRecord {
                    name: s.name.clone(),
                    best_weight,
                    sprite: sprite.clone(),
                }
            })
            .collect()
    }

    fn record_catch(&mut self, name: &str, weight: i32) -> GameResult<bool> {
        if weight <= self.best(name) {
            tracing::debug!(fish = name, weight, "not a personal best");
            return Ok(false);
        }
        let previous = self.records.insert(name.to_string(), weight);
        if let Err(e) = self.save() {
            // keep memory in step with what is on disk
            match previous {
                Some(old) => self.records.insert(name.to_string(), old),
                None => self.records.remove(name),
            };
            return Err(e);
        }
        tracing::info!(fish = name, weight, "new personal best");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn species() -> Vec<FishSpecies> {
        data::parse_species(
            r#"[
            {"name":"Perch","habitat":"Lake","rarity":8,"min_weight":1,"max_weight":4,
             "trophy_caught":"perch","trophy_uncaught":"perch_shadow"},
            {"name":"Carp","habitat":"Both","rarity":5,"min_weight":3,"max_weight":15}
        ]"#,
        )
        .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reelhaven_codex_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn load_nonexistent_returns_empty() {
        let c = Codex::load(species(), temp_path("missing")).unwrap();
        assert!(c.all_records().iter().all(|r| !r.is_caught()));
    }

    #[test]
    fn only_heavier_catches_overwrite() {
        let mut c = Codex::in_memory(species());
        assert!(c.record_catch("Perch", 3).unwrap());
        assert!(!c.record_catch("Perch", 2).unwrap());
        assert!(!c.record_catch("Perch", 3).unwrap());
        assert_eq!(c.best("Perch"), 3);
        assert!(c.record_catch("Perch", 5).unwrap());
        assert_eq!(c.best("Perch"), 5);
    }

    #[test]
    fn record_and_reload() {
        let path = temp_path("roundtrip");
        let mut c = Codex::load(species(), &path).unwrap();
        c.record_catch("Carp", 9).unwrap();
        let loaded = Codex::load(species(), &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.best("Carp"), 9);
        assert_eq!(loaded.best("Perch"), 0);
    }

    #[test]
    fn failed_write_keeps_the_old_best() {
        let dir = std::env::temp_dir().join(format!("reelhaven_no_dir_{}", std::process::id()));
        let mut c = Codex::load(species(), dir.join("codex.json")).unwrap();
        assert!(c.record_catch("Perch", 3).is_err());
        assert_eq!(c.best("Perch"), 0);
        assert!(!c.all_records()[0].is_caught());

        c.records.insert("Carp".into(), 5);
        assert!(c.record_catch("Carp", 9).is_err());
        assert_eq!(c.best("Carp"), 5);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let res = Codex::load(species(), &path);
        fs::remove_file(&path).unwrap();
        assert!(res.is_err());
    }

    #[test]
    fn records_pick_trophy_sprite() {
        let mut c = Codex::in_memory(species());
        let before = c.all_records();
        assert_eq!(before[0].sprite, "perch_shadow");
        c.record_catch("Perch", 2).unwrap();
        let after = c.all_records();
        assert_eq!(after[0].sprite, "perch");
        assert_eq!(after[0].best_weight, 2);
    }

    #[test]
    fn candidates_delegate_to_species_filter() {
        let c = Codex::in_memory(species());
        let lake = c.candidates_by_habitat("Lake");
        assert_eq!(lake[0].name, "Perch");
        assert_eq!(c.candidates_by_habitat("River").len(), 1);
    }
}
