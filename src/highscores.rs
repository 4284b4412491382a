//! High score persistence
//!
//! The engine's only I/O seam. A store is consulted once at session start
//! and written whenever a terminal state beats the stored score; failures
//! degrade to defaults with a warning rather than surfacing errors into the
//! closed simulation.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistence seam for the single best score
pub trait HighScoreStore {
    /// Stored best score, or 0 when nothing is stored yet
    fn load(&self) -> u32;
    /// Persist a new best score
    fn save(&mut self, score: u32);
}

/// On-disk JSON document backing `JsonFileStore`
#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// High score stored as a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<HighScoreFile>(&json) {
                Ok(file) => {
                    log::info!("loaded high score {} from {:?}", file.high_score, self.path);
                    file.high_score
                }
                Err(err) => {
                    log::warn!("corrupt high score file {:?}: {}", self.path, err);
                    0
                }
            },
            // Missing file is the fresh-install case, not a failure
            Err(_) => 0,
        }
    }

    fn save(&mut self, score: u32) {
        let file = HighScoreFile { high_score: score };
        match serde_json::to_string(&file) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("failed to save high score to {:?}: {}", self.path, err);
                } else {
                    log::info!("high score {} saved", score);
                }
            }
            Err(err) => log::warn!("failed to encode high score: {}", err),
        }
    }
}

/// In-memory store for tests and demo runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u32,
    /// Number of times `save` was called
    pub saves: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score, saves: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.high_score
    }

    fn save(&mut self, score: u32) {
        self.high_score = score;
        self.saves += 1;
    }
}
