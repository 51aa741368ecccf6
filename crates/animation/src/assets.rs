//! Asset loader collaborators.
//!
//! An animation key names a directory whose subdirectories are state
//! labels, each holding that state's frames in file-name order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use common::{GameError, GameResult};

use crate::{Frame, FrameSet};

/// Source of drawable frames.
pub trait AssetLoader {
    /// Loads every animation state stored under `key`.
    fn animations(&self, key: &str) -> GameResult<FrameSet>;

    /// Loads a single still frame.
    fn frame(&self, key: &str) -> GameResult<Frame>;
}

/// Loads frames from a directory tree on disk.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn sorted_entries(dir: &Path) -> GameResult<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        Ok(entries)
    }
}

impl AssetLoader for DirectoryAssets {
    fn animations(&self, key: &str) -> GameResult<FrameSet> {
        let dir = self.root.join(key);
        if !dir.is_dir() {
            tracing::error!(path = %dir.display(), "animation folder not found");
            return Err(GameError::AssetNotFound(dir.display().to_string()));
        }
        let mut set = FrameSet::new();
        for state_dir in Self::sorted_entries(&dir)? {
            if !state_dir.is_dir() {
                continue;
            }
            let Some(state) = state_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let frames: Vec<Frame> = Self::sorted_entries(&state_dir)?
                .into_iter()
                .filter(|p| p.is_file())
                .map(|p| Frame::new(p.display().to_string()))
                .collect();
            if frames.is_empty() {
                tracing::warn!(state, path = %state_dir.display(), "animation state has no frames");
                continue;
            }
            set.insert(state, frames);
        }
        if set.is_empty() {
            return Err(GameError::AssetNotFound(dir.display().to_string()));
        }
        tracing::debug!(key, states = set.states().count(), "loaded animations");
        Ok(set)
    }

    fn frame(&self, key: &str) -> GameResult<Frame> {
        let path = self.root.join(key);
        if path.is_file() {
            Ok(Frame::new(path.display().to_string()))
        } else {
            tracing::error!(path = %path.display(), "image not found");
            Err(GameError::AssetNotFound(path.display().to_string()))
        }
    }
}

/// In-memory catalogue, used for the built-in placeholder art.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    sets: HashMap<String, FrameSet>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, set: FrameSet) {
        self.sets.insert(key.into(), set);
    }

    pub fn with(mut self, key: impl Into<String>, set: FrameSet) -> Self {
        self.insert(key, set);
        self
    }
}

impl AssetLoader for MemoryAssets {
    fn animations(&self, key: &str) -> GameResult<FrameSet> {
        self.sets
            .get(key)
            .cloned()
            .ok_or_else(|| GameError::AssetNotFound(key.to_string()))
    }

    fn frame(&self, key: &str) -> GameResult<Frame> {
        // Stills are registered as a one-state set named after the key.
        self.sets
            .get(key)
            .and_then(|set| set.states().next().and_then(|s| set.get(s)))
            .and_then(|frames| frames.first().cloned())
            .ok_or_else(|| GameError::AssetNotFound(key.to_string()))
    }
}
