//! Session state: level index, lives, score and difficulty
//!
//! The session outlives individual levels. It is owned by the game driver and
//! mutated in place by [`super::tick`] and the level transitions.

use serde::{Deserialize, Serialize};

use super::collision::WallSide;
use super::level::DifficultyParameters;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay on the current level
    Playing,
    /// Ball lost, lives remain; ball and platform are back at their start
    LifeLost,
    /// Every brick is destroyed and another level follows
    LevelCleared,
    /// The last level is cleared; the next round starts harder
    AllLevelsCleared,
    /// No lives left
    GameOver,
    /// Quit requested (terminal)
    Exit,
}

/// Things that happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    WallHit(WallSide),
    IndestructibleBrickHit { index: usize },
    BrickHit { index: usize },
    BrickDestroyed { index: usize, points: u64 },
    PlatformHit,
    /// Lives awarded for crossing score thresholds
    ExtraLife { lives: u32 },
    BallLost,
    LevelCleared,
    AllLevelsCleared,
    GameOver,
    Exit,
}

/// Score, lives and progression for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// 1-based index of the current level
    pub level_index: usize,
    pub level_count: usize,
    pub lives: u32,
    pub score: u64,
    pub highscore: u64,
    pub difficulty: DifficultyParameters,
    pub phase: GamePhase,
    last_extra_life_multiple: u64,
    start_lives: u32,
    start_difficulty: DifficultyParameters,
}

impl Session {
    pub fn new(
        level_count: usize,
        start_lives: u32,
        difficulty: DifficultyParameters,
        highscore: u64,
    ) -> Self {
        assert!(level_count > 0, "a session needs at least one level");
        assert!(start_lives > 0, "a session needs at least one life");
        Self {
            level_index: 1,
            level_count,
            lives: start_lives,
            score: 0,
            highscore,
            difficulty,
            phase: GamePhase::Playing,
            last_extra_life_multiple: 0,
            start_lives,
            start_difficulty: difficulty,
        }
    }

    /// Points for destroying a brick on the current level
    pub fn brick_score(&self, start_hitpoints: u32) -> u64 {
        POINTS_PER_HITPOINT * u64::from(start_hitpoints) * self.level_index as u64
    }

    /// Add points and award one life per newly crossed threshold
    ///
    /// Returns the number of lives awarded.
    pub fn add_score(&mut self, points: u64) -> u32 {
        self.score += points;
        let multiple = self.score / POINTS_FOR_EXTRA_LIFE;
        if multiple <= self.last_extra_life_multiple {
            return 0;
        }
        let awarded = (multiple - self.last_extra_life_multiple) as u32;
        self.last_extra_life_multiple = multiple;
        self.lives += awarded;
        log::info!("Extra life x{awarded} at {} points ({} lives)", self.score, self.lives);
        awarded
    }

    /// Take away a life; returns the resulting phase
    pub fn lose_life(&mut self) -> GamePhase {
        self.lives = self.lives.saturating_sub(1);
        self.phase = if self.lives == 0 {
            log::info!("Game over with {} points", self.score);
            GamePhase::GameOver
        } else {
            log::info!("Ball lost, {} lives left", self.lives);
            GamePhase::LifeLost
        };
        self.phase
    }

    /// The current level has no bricks left
    pub fn finish_level(&mut self) -> GamePhase {
        self.phase = if self.all_levels_finished() {
            GamePhase::AllLevelsCleared
        } else {
            GamePhase::LevelCleared
        };
        self.phase
    }

    #[inline]
    pub fn all_levels_finished(&self) -> bool {
        self.level_index >= self.level_count
    }

    /// Leave a transition phase; returns the index of the level to load
    ///
    /// Game over restarts from level 1 with the starting lives and
    /// difficulty. A full clear restarts from level 1 one step harder.
    pub fn advance(&mut self) -> usize {
        match self.phase {
            GamePhase::LevelCleared => {
                self.level_index += 1;
            }
            GamePhase::AllLevelsCleared => {
                self.level_index = 1;
                self.difficulty = self.difficulty.increased();
                log::info!("Difficulty increased: {:?}", self.difficulty);
            }
            GamePhase::GameOver => self.restart(),
            GamePhase::Playing | GamePhase::LifeLost | GamePhase::Exit => {
                return self.level_index;
            }
        }
        self.phase = GamePhase::Playing;
        self.level_index
    }

    /// Take the score as highscore if it beats it
    pub fn record_highscore(&mut self) -> bool {
        if self.score > self.highscore {
            log::info!("New highscore: {} (was {})", self.score, self.highscore);
            self.highscore = self.score;
            true
        } else {
            false
        }
    }

    fn restart(&mut self) {
        self.level_index = 1;
        self.lives = self.start_lives;
        self.score = 0;
        self.last_extra_life_multiple = 0;
        self.difficulty = self.start_difficulty;
    }

    pub fn start_difficulty(&self) -> &DifficultyParameters {
        &self.start_difficulty
    }
}
