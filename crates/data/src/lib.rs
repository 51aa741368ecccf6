//! Species templates for Reelhaven.

use common::{GameError, GameResult};
use serde::Deserialize;

/// Habitat tag that matches every level.
pub const ANY_HABITAT: &str = "Both";

/// Fish species parameters loaded from JSON.
///
/// `rarity` is an acceptance weight out of ten: higher values are
/// picked more often. Weights are whole pounds, `max_weight` exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FishSpecies {
    pub name: String,
    pub habitat: String,
    pub rarity: u32,
    pub min_weight: i32,
    pub max_weight: i32,
    /// Asset key of the swimming animation.
    #[serde(default)]
    pub sprite: String,
    #[serde(default)]
    pub trophy_caught: String,
    #[serde(default)]
    pub trophy_uncaught: String,
}

impl FishSpecies {
    /// `true` if this species can bite in `habitat`.
    pub fn lives_in(&self, habitat: &str) -> bool {
        self.habitat == habitat || self.habitat == ANY_HABITAT
    }

    fn validate(&self) -> GameResult<()> {
        if self.name.is_empty() {
            return Err(GameError::Parse("species without a name".into()));
        }
        if self.min_weight < 0 || self.max_weight <= self.min_weight {
            return Err(GameError::Parse(format!(
                "{}: weight range {}..{} is empty",
                self.name, self.min_weight, self.max_weight
            )));
        }
        Ok(())
    }
}

/// Loads the species list from a JSON file.
pub fn load_species(path: &str) -> GameResult<Vec<FishSpecies>> {
    let data = std::fs::read_to_string(path)?;
    parse_species(&data)
}

/// Loads species embedded at compile time (used on WASM).
pub fn load_species_embedded() -> GameResult<Vec<FishSpecies>> {
    parse_species(include_str!("../../../assets/fish.json"))
}

/// Parses and validates a species document.
pub fn parse_species(data: &str) -> GameResult<Vec<FishSpecies>> {
    let species: Vec<FishSpecies> = serde_json::from_str(data)?;
    if species.is_empty() {
        return Err(GameError::Parse("species list is empty".into()));
    }
    for s in &species {
        s.validate()?;
    }
    tracing::debug!(count = species.len(), "species parsed");
    Ok(species)
}

/// Species that can bite in `habitat`, most common first.
pub fn candidates_by_habitat(species: &[FishSpecies], habitat: &str) -> Vec<FishSpecies> {
    let mut pool: Vec<FishSpecies> = species
        .iter()
        .filter(|s| s.lives_in(habitat))
        .cloned()
        .collect();
    pool.sort_by(|a, b| b.rarity.cmp(&a.rarity));
    pool
}
