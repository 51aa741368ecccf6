//! Frame-sequence animation driven by a fixed tick.
//!
//! An [`Animator`] holds a shared [`FrameSet`] (state label -> ordered
//! frames) and advances through the active sequence once every
//! `speed` ticks. Asset discovery lives in [`assets`].

pub mod assets;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{GameError, GameResult};

pub use assets::{AssetLoader, DirectoryAssets, MemoryAssets};

/// Ticks per frame used by most entities.
pub const DEFAULT_ANIMATION_SPEED: u32 = 5;
/// Ticks per frame for one-shot actions such as casting.
pub const ACTION_ANIMATION_SPEED: u32 = 10;
/// The frame index only moves when the tick counter reads 1, so a
/// cadence below 2 would freeze the sequence.
pub const MIN_ANIMATION_SPEED: u32 = 2;

/// A single drawable frame, identified by where it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub source: String,
}

impl Frame {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Mapping from animation state label to its ordered frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSet {
    sequences: BTreeMap<String, Vec<Frame>>,
}

impl FrameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds placeholder frames for each `(state, frame_count)` pair.
    pub fn synthetic(key: &str, states: &[(&str, usize)]) -> Self {
        let mut set = Self::new();
        for (state, count) in states {
            let frames = (0..*count)
                .map(|i| Frame::new(format!("builtin:{key}/{state}/{i}")))
                .collect();
            set.insert(*state, frames);
        }
        set
    }

    pub fn insert(&mut self, state: impl Into<String>, frames: Vec<Frame>) {
        self.sequences.insert(state.into(), frames);
    }

    pub fn get(&self, state: &str) -> Option<&[Frame]> {
        self.sequences.get(state).map(Vec::as_slice)
    }

    pub fn contains(&self, state: &str) -> bool {
        self.get(state).is_some_and(|f| !f.is_empty())
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Fails on the first listed state that has no frames.
    pub fn require(&self, states: &[&str]) -> GameResult<()> {
        for state in states {
            if !self.contains(state) {
                return Err(GameError::MissingAnimation {
                    state: state.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Per-entity playback state over a shared [`FrameSet`].
#[derive(Clone, Debug)]
pub struct Animator {
    frames: Arc<FrameSet>,
    state: String,
    frame: usize,
    counter: u32,
    speed: u32,
    complete: bool,
}

impl Animator {
    /// Creates an animator starting in `initial`.
    ///
    /// Fails when `initial` has no registered frames, so an entity can never
    /// be built in an undrawable state.
    pub fn new(frames: Arc<FrameSet>, initial: &str, speed: u32) -> GameResult<Self> {
        frames.require(&[initial])?;
        Ok(Self {
            frames,
            state: initial.to_string(),
            frame: 0,
            counter: 0,
            speed: speed.max(MIN_ANIMATION_SPEED),
            complete: false,
        })
    }

    /// Switches to `state`, restarting playback if it differs from the
    /// current one.
    pub fn set_state(&mut self, state: &str) -> GameResult<()> {
        if self.state == state {
            return Ok(());
        }
        if !self.frames.contains(state) {
            tracing::error!(state, current = %self.state, "animation state missing");
            return Err(GameError::MissingAnimation {
                state: state.to_string(),
            });
        }
        self.state = state.to_string();
        self.refresh();
        Ok(())
    }

    /// Restarts the current sequence from its first frame.
    pub fn refresh(&mut self) {
        self.frame = 0;
        self.counter = 0;
        self.complete = false;
    }

    /// Advances playback by one tick.
    pub fn advance(&mut self) {
        let len = self.sequence().len();
        if len == 0 {
            return;
        }
        if self.counter == 1 {
            self.frame = (self.frame + 1) % len;
        }
        self.counter = (self.counter + 1) % self.speed;
        self.complete = self.frame == len - 1;
    }

    fn sequence(&self) -> &[Frame] {
        self.frames.get(&self.state).unwrap_or(&[])
    }

    /// Frame to draw this tick.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.sequence().get(self.frame)
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// `true` once the last frame of the sequence is showing.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(MIN_ANIMATION_SPEED);
        self.counter %= self.speed;
    }

    pub fn frames(&self) -> &Arc<FrameSet> {
        &self.frames
    }
}
