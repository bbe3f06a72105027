//! Highscore file
//!
//! A single decimal integer in a text file. Reading never fails: a missing,
//! unreadable or non-numeric file counts as 0. Writing replaces the file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Best score so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u64,
}

impl HighScore {
    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Load from `path`, falling back to 0
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::info!("No highscore at {} ({err}), starting at 0", path.display());
                return Self::default();
            }
        };

        let token = text.split_whitespace().next().unwrap_or("");
        match token.parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded highscore {score}");
                Self { score }
            }
            Err(_) => {
                log::warn!("Highscore file {} is not a number, starting at 0", path.display());
                Self::default()
            }
        }
    }

    /// Overwrite `path` with the score
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.score.to_string())?;
        log::info!("Highscore {} saved to {}", self.score, path.display());
        Ok(())
    }
}
