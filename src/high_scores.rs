//! Per-mode high-score lists, persisted as one JSON file next to the
//! executable.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gameplay::session::GameMode;

// === Constants ===

/// Names are clipped to this many characters on save.
pub const MAX_NAME_LEN: usize = 9;

/// Default score file location.
pub const SCORE_FILE: &str = "high_scores.json";

// === Types ===

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("score file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: f32,
}

/// All three score lists, each kept sorted best-first.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    timed_box: Vec<ScoreEntry>,
    timed_moving: Vec<ScoreEntry>,
    human_target: Vec<ScoreEntry>,
}

/// In the human-target mode the score is elapsed seconds, so smaller
/// wins; the timed modes count points.
#[must_use]
pub const fn lower_is_better(mode: GameMode) -> bool {
    matches!(mode, GameMode::HumanTarget)
}

impl HighScores {
    /// Entries for a mode, best first. Empty for `Idle`.
    #[must_use]
    pub fn entries(&self, mode: GameMode) -> &[ScoreEntry] {
        match mode {
            GameMode::Idle => &[],
            GameMode::TimedBox => &self.timed_box,
            GameMode::TimedMoving => &self.timed_moving,
            GameMode::HumanTarget => &self.human_target,
        }
    }

    /// Record a score. The name is clipped to [`MAX_NAME_LEN`]
    /// characters and the list is re-sorted best-first.
    pub fn add(&mut self, mode: GameMode, name: &str, score: f32) {
        let list = match mode {
            GameMode::Idle => return,
            GameMode::TimedBox => &mut self.timed_box,
            GameMode::TimedMoving => &mut self.timed_moving,
            GameMode::HumanTarget => &mut self.human_target,
        };

        let name = name.chars().take(MAX_NAME_LEN).collect::<String>();
        list.push(ScoreEntry { name, score });
        if lower_is_better(mode) {
            list.sort_by(|a, b| a.score.total_cmp(&b.score));
        } else {
            list.sort_by(|a, b| b.score.total_cmp(&a.score));
        }
    }

    /// Read the score file; a missing file is an empty board.
    pub fn load(path: &Path) -> Result<Self, HighScoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Where the score file lives.
#[derive(Resource, Debug, Clone)]
pub struct ScoreFilePath(pub PathBuf);

impl Default for ScoreFilePath {
    fn default() -> Self {
        Self(PathBuf::from(SCORE_FILE))
    }
}

// === Systems ===

fn load_high_scores(path: Res<ScoreFilePath>, mut commands: Commands) {
    let scores = match HighScores::load(&path.0) {
        Ok(scores) => scores,
        Err(err) => {
            warn!("could not read {:?}, starting empty: {err}", path.0);
            HighScores::default()
        }
    };
    commands.insert_resource(scores);
}

// === Plugin ===

pub fn plugin(app: &mut App) {
    app.init_resource::<ScoreFilePath>();
    app.add_systems(Startup, load_high_scores);
}
