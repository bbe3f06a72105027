//! Bricks - A fixed-timestep brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (motion, collisions, level, session state)
//! - `game`: Frame loop driver and level transitions
//! - `persistence`: Level files and level catalog
//! - `renderer`: Software framebuffer rendering
//! - `host`: Input sources and frame pacing
//! - `audio`: Sound cue dispatch
//! - `highscores`, `settings`: Small files next to the game

pub mod audio;
pub mod game;
pub mod highscores;
pub mod host;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the fixed-timestep loop
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Frame budget in milliseconds (~16.67 ms at 60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

    /// Thickness of the left, right and top walls (grid units)
    pub const WALL_THICKNESS: f64 = 1.0;

    /// Platform defaults
    pub const PLATFORM_HEIGHT: f64 = 0.5;

    /// Ball defaults
    pub const BALL_WIDTH: f64 = 0.75;
    pub const BALL_HEIGHT: f64 = 0.75;
    /// Launch angle in degrees (down-left, y grows downward)
    pub const BALL_START_ANGLE: f64 = 135.0;

    /// Brick hitpoints range (one palette tier per hitpoint)
    pub const MAX_HITPOINTS: u32 = 9;

    /// Scoring
    pub const POINTS_PER_HITPOINT: u64 = 100;
    pub const POINTS_FOR_EXTRA_LIFE: u64 = 10_000;

    /// Session defaults
    pub const START_LIVES: u32 = 3;

    /// Level files
    pub const LEVEL_EXTENSION: &str = "lvl";
    pub const LEVEL_DIR: &str = "levels";
    pub const HIGHSCORE_FILE: &str = "highscore.dat";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }
}
